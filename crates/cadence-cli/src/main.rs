//! Cadence CLI - Recurring-charge detector
//!
//! Usage:
//!   cadence detect --file export.csv     Detect recurring patterns
//!   cadence check -m Netflix -a -15.49   Test a charge against patterns
//!   cadence upcoming --days 14           Expected charges in a window

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Detect {
            min_occurrences,
            json,
        } => commands::cmd_detect(&cli.file, min_occurrences, json),
        Commands::Check { merchant, amount } => commands::cmd_check(&cli.file, &merchant, amount),
        Commands::Upcoming { days } => commands::cmd_upcoming(&cli.file, days),
    }
}
