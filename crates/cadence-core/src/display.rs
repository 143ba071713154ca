//! Presentation helpers for detected patterns
//!
//! Fixed label tables consumed by UI surfaces; the detection engine itself
//! never formats anything.

use serde::Serialize;

use crate::models::Frequency;

/// Human-readable cadence label
pub fn frequency_label(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Weekly => "Weekly",
        Frequency::Biweekly => "Bi-weekly",
        Frequency::Monthly => "Monthly",
        Frequency::Quarterly => "Quarterly",
        Frequency::Annually => "Annually",
    }
}

/// Presentation bucket for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfidenceLevel {
    pub level: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Bucket a 0-100 confidence score into a display level.
///
/// Thresholds: >=90 very_high, >=75 high, >=60 medium, else low.
pub fn confidence_level(confidence: u8) -> ConfidenceLevel {
    if confidence >= 90 {
        ConfidenceLevel {
            level: "very_high",
            label: "Very high",
            color: "green",
        }
    } else if confidence >= 75 {
        ConfidenceLevel {
            level: "high",
            label: "High",
            color: "teal",
        }
    } else if confidence >= 60 {
        ConfidenceLevel {
            level: "medium",
            label: "Medium",
            color: "yellow",
        }
    } else {
        ConfidenceLevel {
            level: "low",
            label: "Low",
            color: "gray",
        }
    }
}
