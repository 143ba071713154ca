//! Cadence Core Library
//!
//! Shared functionality for the Cadence recurring-charge detector:
//! - Recurring-transaction pattern detection (grouping, amount-similarity
//!   filtering, interval analysis, cadence classification, ranking)
//! - Queries for matching transactions against detected patterns
//! - CSV/JSON transaction file loading
//! - Presentation helpers for cadence and confidence display

pub mod detect;
pub mod display;
pub mod error;
pub mod import;
pub mod models;

pub use detect::{
    amounts_similar, detect_recurring_patterns, matches_recurring_pattern,
    recurring_pattern_for_transaction, CaseFoldNormalizer, MerchantNormalizer, PatternDetector,
    AMOUNT_TOLERANCE, DEFAULT_MIN_OCCURRENCES, MIN_CONFIDENCE,
};
pub use display::{confidence_level, frequency_label, ConfidenceLevel};
pub use error::{Error, Result};
pub use import::load_transactions;
pub use models::{Frequency, RecurringPattern, Transaction};
