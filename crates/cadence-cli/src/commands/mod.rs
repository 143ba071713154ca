//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `detect` - Run pattern detection and print the ranked results
//! - `check` - Test an ad-hoc charge against the detected patterns
//! - `upcoming` - Project expected charges within a day window

pub mod check;
pub mod detect;
pub mod upcoming;

// Re-export command functions for main.rs
pub use check::*;
pub use detect::*;
pub use upcoming::*;

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::Transaction;
use tracing::debug;

/// Load the transaction file shared by every command
pub fn load_file(file: &Path) -> Result<Vec<Transaction>> {
    let transactions = cadence_core::load_transactions(file)
        .with_context(|| format!("Failed to load transactions from {}", file.display()))?;
    debug!("Loaded {} transactions from {}", transactions.len(), file.display());
    Ok(transactions)
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
