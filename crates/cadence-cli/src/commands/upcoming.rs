//! Upcoming command implementation

use std::path::Path;

use anyhow::Result;
use cadence_core::{detect_recurring_patterns, frequency_label, DEFAULT_MIN_OCCURRENCES};
use chrono::{Duration, Utc};

use super::{load_file, truncate};

pub fn cmd_upcoming(file: &Path, days: i64) -> Result<()> {
    let transactions = load_file(file)?;
    let patterns = detect_recurring_patterns(&transactions, DEFAULT_MIN_OCCURRENCES);

    let today = Utc::now().date_naive();
    let cutoff = today + Duration::days(days);

    let mut due: Vec<_> = patterns
        .iter()
        .filter(|p| p.next_expected_date <= cutoff)
        .collect();
    due.sort_by_key(|p| p.next_expected_date);

    if due.is_empty() {
        println!("No expected charges in the next {} days.", days);
        return Ok(());
    }

    println!();
    println!("📅 Expected Charges (next {} days)", days);
    println!("   ─────────────────────────────────────────────────────────────");

    for p in due {
        // Patterns projected before today come from stale history
        let marker = if p.next_expected_date < today {
            "⚠ overdue"
        } else {
            ""
        };
        println!(
            "   {} │ {:20} │ {:>9} ({}) {}",
            p.next_expected_date,
            truncate(&p.merchant, 20),
            format!("${:.2}", p.average_amount.abs()),
            frequency_label(p.frequency),
            marker
        );
    }

    Ok(())
}
