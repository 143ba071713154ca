//! Domain models for Cadence

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A financial transaction (read-only input to detection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub merchant: String,
    /// Negative = expense, positive = income
    pub amount: f64,
}

/// Recurrence cadence of a detected pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annually,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annually => "annually",
        }
    }

    /// Whether patterns at this cadence anchor on a day of the month.
    ///
    /// Weekly and biweekly cadences anchor on a weekday instead.
    pub fn anchors_on_day_of_month(&self) -> bool {
        matches!(self, Self::Monthly | Self::Quarterly | Self::Annually)
    }

    /// Advance a date by one cadence unit.
    ///
    /// Monthly and longer cadences use calendar arithmetic (Jan 31 + 1 month
    /// = Feb 28), not fixed day counts.
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => date + Duration::days(7),
            Self::Biweekly => date + Duration::days(14),
            Self::Monthly => date + Months::new(1),
            Self::Quarterly => date + Months::new(3),
            Self::Annually => date + Months::new(12),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annually" | "yearly" => Ok(Self::Annually),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected recurring charge pattern
///
/// Immutable once constructed. Recomputed fresh on every detection run;
/// `id` is not stable across runs and must not be persisted as a key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringPattern {
    pub id: String,
    /// Display-cased merchant name from the first transaction in the group
    pub merchant: String,
    /// Signed mean of the amounts in the similarity-filtered subset
    pub average_amount: f64,
    pub frequency: Frequency,
    /// 0-100, blends interval consistency and proximity to the canonical period
    pub confidence: u8,
    /// Ids of the member transactions (the similarity-filtered subset)
    pub transaction_ids: Vec<String>,
    /// Most recent member date advanced by one cadence unit
    pub next_expected_date: NaiveDate,
    /// Anchor day for monthly/quarterly/annually cadences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    /// Anchor weekday (0 = Sunday) for weekly/biweekly cadences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_roundtrip() {
        for freq in [
            Frequency::Weekly,
            Frequency::Biweekly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::Annually,
        ] {
            assert_eq!(freq.as_str().parse::<Frequency>().unwrap(), freq);
        }
        assert!("fortnightly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_advance_fixed_cadences() {
        assert_eq!(
            Frequency::Weekly.advance(ymd(2025, 3, 7)),
            ymd(2025, 3, 14)
        );
        assert_eq!(
            Frequency::Biweekly.advance(ymd(2025, 3, 7)),
            ymd(2025, 3, 21)
        );
    }

    #[test]
    fn test_advance_calendar_cadences() {
        assert_eq!(
            Frequency::Monthly.advance(ymd(2025, 1, 15)),
            ymd(2025, 2, 15)
        );
        // Month-end clamps instead of spilling into March
        assert_eq!(
            Frequency::Monthly.advance(ymd(2025, 1, 31)),
            ymd(2025, 2, 28)
        );
        assert_eq!(
            Frequency::Quarterly.advance(ymd(2025, 11, 30)),
            ymd(2026, 2, 28)
        );
        assert_eq!(
            Frequency::Annually.advance(ymd(2024, 2, 29)),
            ymd(2025, 2, 28)
        );
    }

    #[test]
    fn test_anchor_kind() {
        assert!(Frequency::Monthly.anchors_on_day_of_month());
        assert!(Frequency::Quarterly.anchors_on_day_of_month());
        assert!(Frequency::Annually.anchors_on_day_of_month());
        assert!(!Frequency::Weekly.anchors_on_day_of_month());
        assert!(!Frequency::Biweekly.anchors_on_day_of_month());
    }
}
