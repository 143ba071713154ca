//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cadence - Find the recurring charges hiding in your transactions
#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Recurring-charge detector for transaction exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction file (.csv or .json)
    #[arg(short, long, default_value = "transactions.csv", global = true)]
    pub file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect recurring charge patterns
    Detect {
        /// Minimum member transactions required per pattern
        #[arg(long, default_value = "3")]
        min_occurrences: usize,

        /// Emit patterns as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Test a merchant/amount pair against the detected patterns
    Check {
        /// Merchant name (case-insensitive)
        #[arg(short, long)]
        merchant: String,

        /// Transaction amount (negative = expense)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,
    },

    /// List expected charges in the coming days
    Upcoming {
        /// Window size in days
        #[arg(short, long, default_value = "30")]
        days: i64,
    },
}
