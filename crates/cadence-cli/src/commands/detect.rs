//! Detect command implementation

use std::path::Path;

use anyhow::Result;
use cadence_core::{confidence_level, detect_recurring_patterns, frequency_label};

use super::{load_file, truncate};

pub fn cmd_detect(file: &Path, min_occurrences: usize, json: bool) -> Result<()> {
    let transactions = load_file(file)?;
    let patterns = detect_recurring_patterns(&transactions, min_occurrences);

    if json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
        return Ok(());
    }

    if patterns.is_empty() {
        println!("No recurring patterns detected in {} transactions.", transactions.len());
        println!("Patterns need at least {} charges at a steady cadence.", min_occurrences);
        return Ok(());
    }

    println!();
    println!("🔁 Recurring Charges");
    println!("   ─────────────────────────────────────────────────────────────");

    for p in &patterns {
        let level = confidence_level(p.confidence);
        println!(
            "   {:20} │ {:>9}/{:<9} │ next {} │ {:>3}% ({})",
            truncate(&p.merchant, 20),
            format!("${:.2}", p.average_amount.abs()),
            frequency_label(p.frequency),
            p.next_expected_date,
            p.confidence,
            level.label
        );
    }

    println!();
    println!(
        "   {} pattern(s) from {} transactions",
        patterns.len(),
        transactions.len()
    );

    Ok(())
}
