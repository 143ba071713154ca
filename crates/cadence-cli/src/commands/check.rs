//! Check command implementation

use std::path::Path;

use anyhow::Result;
use cadence_core::{
    detect_recurring_patterns, frequency_label, matches_recurring_pattern, Transaction,
    DEFAULT_MIN_OCCURRENCES,
};
use chrono::Utc;

use super::load_file;

pub fn cmd_check(file: &Path, merchant: &str, amount: f64) -> Result<()> {
    let transactions = load_file(file)?;
    let patterns = detect_recurring_patterns(&transactions, DEFAULT_MIN_OCCURRENCES);

    let candidate = Transaction {
        id: String::new(),
        date: Utc::now().date_naive(),
        merchant: merchant.to_string(),
        amount,
    };

    let matched: Vec<_> = patterns
        .iter()
        .filter(|p| matches_recurring_pattern(&candidate, p))
        .collect();

    if matched.is_empty() {
        println!(
            "❓ ${:.2} at {} doesn't match any detected recurring pattern.",
            amount.abs(),
            merchant
        );
        return Ok(());
    }

    for p in matched {
        println!(
            "✅ Matches {} ({} @ ${:.2}, confidence {}%)",
            p.merchant,
            frequency_label(p.frequency),
            p.average_amount.abs(),
            p.confidence
        );
    }

    Ok(())
}
