//! Recurring-charge pattern detection
//!
//! Inspects a transaction history and infers which merchants represent
//! recurring charges (subscriptions, bills, paychecks), at what cadence,
//! with what confidence, and when the next occurrence is expected.
//!
//! The pipeline runs per merchant group:
//! 1. Group transactions by normalized merchant
//! 2. Keep the subset whose amounts cluster around the group mean
//! 3. Compute day-gaps between consecutive charges
//! 4. Map the interval statistics to a cadence with a confidence score
//! 5. Assemble the `RecurringPattern`
//! 6. Rank results by descending confidence
//!
//! Detection is a pure read: no I/O, no mutation, recomputed on demand.
//! Failures degrade by omission rather than by raising errors; a merchant
//! that doesn't fit any cadence simply produces no pattern.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Frequency, RecurringPattern, Transaction};

/// Relative tolerance for the amount-similarity filter (10% of the
/// average magnitude of the two amounts being compared)
pub const AMOUNT_TOLERANCE: f64 = 0.10;

/// Patterns scoring below this confidence are never emitted
pub const MIN_CONFIDENCE: u8 = 50;

/// Default minimum member-transaction count for a pattern
pub const DEFAULT_MIN_OCCURRENCES: usize = 3;

/// Merchant identity normalization for grouping.
///
/// The default implementation case-folds and trims. A fuzzier strategy
/// (strip store numbers, collapse payment-processor prefixes) can be
/// plugged in without changing the grouping algorithm.
pub trait MerchantNormalizer {
    fn normalize(&self, merchant: &str) -> String;
}

/// Default normalizer: whitespace-trimmed, case-folded
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFoldNormalizer;

impl MerchantNormalizer for CaseFoldNormalizer {
    fn normalize(&self, merchant: &str) -> String {
        merchant.trim().to_lowercase()
    }
}

/// Recurring-pattern detector
///
/// Holds the occurrence threshold and the merchant normalization strategy.
/// [`detect_recurring_patterns`] is the plain-function entry point for
/// callers that don't need to customize either.
pub struct PatternDetector<N = CaseFoldNormalizer> {
    min_occurrences: usize,
    normalizer: N,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::with_min_occurrences(DEFAULT_MIN_OCCURRENCES)
    }

    pub fn with_min_occurrences(min_occurrences: usize) -> Self {
        Self {
            min_occurrences,
            normalizer: CaseFoldNormalizer,
        }
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: MerchantNormalizer> PatternDetector<N> {
    pub fn with_normalizer(min_occurrences: usize, normalizer: N) -> Self {
        Self {
            min_occurrences,
            normalizer,
        }
    }

    /// Run detection over a transaction history.
    ///
    /// Returns patterns ranked by descending confidence. Deterministic for
    /// a given input except for the freshly generated pattern ids.
    pub fn detect(&self, transactions: &[Transaction]) -> Vec<RecurringPattern> {
        let groups = self.group_by_merchant(transactions);

        let mut patterns: Vec<RecurringPattern> = Vec::new();
        for group in groups.into_values() {
            // Too few charges to establish any pattern
            if group.len() < self.min_occurrences {
                continue;
            }

            let Some(pattern) = self.detect_in_group(&group) else {
                continue;
            };

            if pattern.confidence < MIN_CONFIDENCE {
                debug!(
                    merchant = %pattern.merchant,
                    confidence = pattern.confidence,
                    "Discarding low-confidence pattern"
                );
                continue;
            }

            patterns.push(pattern);
        }

        // Stable sort: equal-confidence patterns keep merchant-group order
        patterns.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        patterns
    }

    /// Partition transactions by normalized merchant identity.
    ///
    /// Original transaction objects are preserved so the display-cased
    /// merchant name survives for pattern construction. Within a group,
    /// input order is kept.
    fn group_by_merchant<'a>(
        &self,
        transactions: &'a [Transaction],
    ) -> BTreeMap<String, Vec<&'a Transaction>> {
        let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
        for tx in transactions {
            groups
                .entry(self.normalizer.normalize(&tx.merchant))
                .or_default()
                .push(tx);
        }
        groups
    }

    /// Detect a pattern within one merchant's transactions.
    ///
    /// A transaction belongs to at most one pattern per run; the detector
    /// does not search for multiple concurrent cadences within a merchant.
    fn detect_in_group(&self, group: &[&Transaction]) -> Option<RecurringPattern> {
        // Amount-similarity filter: a merchant may mix a recurring charge
        // with one-off purchases. Filtering against the group mean isolates
        // the recurring sub-series. Each amount is compared to the mean of
        // the full group, not a refined mean with outliers removed.
        let group_avg = mean(&group.iter().map(|tx| tx.amount).collect::<Vec<_>>());
        let mut members: Vec<&Transaction> = group
            .iter()
            .filter(|tx| amounts_similar(tx.amount, group_avg, AMOUNT_TOLERANCE))
            .copied()
            .collect();

        if members.len() < self.min_occurrences {
            return None;
        }

        // Interval analysis over the filtered subset, newest first
        members.sort_by(|a, b| b.date.cmp(&a.date));
        let intervals = day_gaps(&members);
        let classification = classify_intervals(&intervals)?;

        // Display name comes from the first transaction of the group in
        // input order, pre-normalization
        Some(build_pattern(&group[0].merchant, &members, classification))
    }
}

/// Detect recurring charge patterns in a transaction history.
///
/// Patterns need at least `min_occurrences` member transactions (3 is the
/// conventional default: two charges can be coincidence). Results are
/// ranked by descending confidence.
pub fn detect_recurring_patterns(
    transactions: &[Transaction],
    min_occurrences: usize,
) -> Vec<RecurringPattern> {
    PatternDetector::with_min_occurrences(min_occurrences).detect(transactions)
}

/// Two amounts are similar when their difference is within `tolerance`
/// of their average magnitude: `|a - b| / ((|a| + |b|) / 2) <= tolerance`.
///
/// Sign is ignored for the magnitude comparison; a $14.99 charge and a
/// $15.49 charge are similar at the default 10% tolerance.
pub fn amounts_similar(a: f64, b: f64, tolerance: f64) -> bool {
    let avg_magnitude = (a.abs() + b.abs()) / 2.0;
    if avg_magnitude == 0.0 {
        // Both amounts are zero
        return true;
    }
    (a - b).abs() / avg_magnitude <= tolerance
}

/// Test an arbitrary transaction against an already-computed pattern.
///
/// True iff the merchant matches case-insensitively and the amount is
/// similar to the pattern's average under the standard tolerance. The
/// transaction need not have been part of the original detection run.
pub fn matches_recurring_pattern(tx: &Transaction, pattern: &RecurringPattern) -> bool {
    let normalizer = CaseFoldNormalizer;
    normalizer.normalize(&tx.merchant) == normalizer.normalize(&pattern.merchant)
        && amounts_similar(tx.amount, pattern.average_amount, AMOUNT_TOLERANCE)
}

/// Find the pattern a transaction belongs to, by member id.
///
/// Returns the first pattern (in list order) whose member set contains the
/// transaction's id.
pub fn recurring_pattern_for_transaction<'a>(
    tx: &Transaction,
    patterns: &'a [RecurringPattern],
) -> Option<&'a RecurringPattern> {
    patterns
        .iter()
        .find(|p| p.transaction_ids.iter().any(|id| *id == tx.id))
}

/// Cadence classification for one merchant's interval statistics
#[derive(Debug, Clone, Copy)]
struct Classification {
    frequency: Frequency,
    confidence: u8,
}

/// Recognition band for one cadence: the inclusive average-interval range
/// it claims, its canonical period, and the per-day penalty for drifting
/// from it
struct CadenceBand {
    min_days: f64,
    max_days: f64,
    canonical_days: f64,
    penalty_per_day: f64,
}

/// Band table. Real billing cycles cluster near the canonical periods but
/// drift by a few days (28-31-day months, posting delays); the bands keep
/// a 20-day average from being called weekly or monthly.
fn band(frequency: Frequency) -> CadenceBand {
    match frequency {
        Frequency::Weekly => CadenceBand {
            min_days: 6.0,
            max_days: 8.0,
            canonical_days: 7.0,
            penalty_per_day: 10.0,
        },
        Frequency::Biweekly => CadenceBand {
            min_days: 13.0,
            max_days: 15.0,
            canonical_days: 14.0,
            penalty_per_day: 7.0,
        },
        Frequency::Monthly => CadenceBand {
            min_days: 28.0,
            max_days: 32.0,
            canonical_days: 30.0,
            penalty_per_day: 3.0,
        },
        Frequency::Quarterly => CadenceBand {
            min_days: 88.0,
            max_days: 95.0,
            canonical_days: 91.0,
            penalty_per_day: 1.0,
        },
        Frequency::Annually => CadenceBand {
            min_days: 360.0,
            max_days: 370.0,
            canonical_days: 365.0,
            penalty_per_day: 0.5,
        },
    }
}

/// Map an average interval to the cadence whose band contains it.
///
/// The bands are disjoint, so at most one cadence claims any interval.
fn frequency_for_interval(avg_interval: f64) -> Option<Frequency> {
    [
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Annually,
    ]
    .into_iter()
    .find(|freq| {
        let b = band(*freq);
        avg_interval >= b.min_days && avg_interval <= b.max_days
    })
}

/// Day-count gaps between adjacent transactions, which must be sorted by
/// date descending. Produces n-1 intervals for n transactions.
fn day_gaps(sorted: &[&Transaction]) -> Vec<i64> {
    sorted
        .windows(2)
        .map(|w| (w[0].date - w[1].date).num_days().abs())
        .collect()
}

/// Classify interval statistics into a cadence with a confidence score.
///
/// Confidence blends two components, both on a 0-100 scale:
/// - consistency: `100 - (stddev / avg) * 100`, clamped at 0. Perfectly
///   regular spacing scores 100; high variance drives it toward 0.
/// - frequency match: `100 - |avg - canonical| * penalty`, clamped at 0.
///   Rewards proximity to the band's canonical period.
///
/// An average interval outside every band yields no classification.
fn classify_intervals(intervals: &[i64]) -> Option<Classification> {
    if intervals.is_empty() {
        return None;
    }

    let values: Vec<f64> = intervals.iter().map(|&d| d as f64).collect();
    let avg_interval = mean(&values);

    // Band membership first: it also guarantees avg_interval > 0 before
    // the consistency division below
    let frequency = frequency_for_interval(avg_interval)?;
    let b = band(frequency);

    let std_dev = std_deviation(&values, avg_interval);
    let consistency = (100.0 - (std_dev / avg_interval) * 100.0).max(0.0);
    let frequency_match =
        (100.0 - (avg_interval - b.canonical_days).abs() * b.penalty_per_day).max(0.0);

    let confidence = ((consistency + frequency_match) / 2.0).min(100.0).round() as u8;

    debug!(
        frequency = %frequency,
        avg_interval,
        std_dev,
        consistency,
        frequency_match,
        confidence,
        "Classified interval statistics"
    );

    Some(Classification {
        frequency,
        confidence,
    })
}

/// Assemble the final pattern from the filtered members (sorted newest
/// first) and the classifier result.
fn build_pattern(
    display_name: &str,
    members: &[&Transaction],
    classification: Classification,
) -> RecurringPattern {
    let average_amount = mean(&members.iter().map(|tx| tx.amount).collect::<Vec<_>>());

    // The most recent member anchors both the projection and the
    // day-of-month/day-of-week
    let latest = members[0];
    let next_expected_date = classification.frequency.advance(latest.date);

    let (day_of_month, day_of_week) = if classification.frequency.anchors_on_day_of_month() {
        (Some(latest.date.day()), None)
    } else {
        (None, Some(latest.date.weekday().num_days_from_sunday()))
    };

    RecurringPattern {
        id: Uuid::new_v4().to_string(),
        merchant: display_name.to_string(),
        average_amount,
        frequency: classification.frequency,
        confidence: classification.confidence,
        transaction_ids: members.iter().map(|tx| tx.id.clone()).collect(),
        next_expected_date,
        day_of_month,
        day_of_week,
    }
}

/// Arithmetic mean; 0.0 for an empty slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
fn std_deviation(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
