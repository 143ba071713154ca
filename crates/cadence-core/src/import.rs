//! Transaction file loading
//!
//! The detector consumes an in-memory transaction list; these parsers get
//! one out of a CSV export or a JSON file. CSV columns are looked up by
//! header name so exports with extra columns still load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Load transactions from a file, dispatching on the extension
/// (`.csv` or `.json`).
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => parse_csv(file),
        Some("json") => parse_json(file),
        other => Err(Error::Import(format!(
            "Unsupported file extension: {:?} (expected .csv or .json)",
            other
        ))),
    }
}

/// Parse a CSV transaction file.
///
/// Required columns: `date`, `merchant` (or `description`), `amount`.
/// An `id` column is used when present; rows without one get a fresh id.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |names: &[&str]| -> Option<usize> {
        headers
            .iter()
            .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
    };

    let date_col = column(&["date", "transaction date"])
        .ok_or_else(|| Error::Import("Missing 'date' column".into()))?;
    let merchant_col = column(&["merchant", "description", "payee"])
        .ok_or_else(|| Error::Import("Missing 'merchant' column".into()))?;
    let amount_col = column(&["amount"])
        .ok_or_else(|| Error::Import("Missing 'amount' column".into()))?;
    let id_col = column(&["id", "transaction id"]);

    let mut transactions = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let date_str = record
            .get(date_col)
            .ok_or_else(|| Error::Import("Missing date".into()))?;
        let date = parse_date(date_str)?;

        let merchant = record
            .get(merchant_col)
            .ok_or_else(|| Error::Import("Missing merchant".into()))?
            .trim()
            .to_string();
        if merchant.is_empty() {
            return Err(Error::Import(format!("Empty merchant on {}", date)));
        }

        let amount_str = record
            .get(amount_col)
            .ok_or_else(|| Error::Import("Missing amount".into()))?;
        let amount = parse_amount(amount_str)?;

        let id = id_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        transactions.push(Transaction {
            id,
            date,
            merchant,
            amount,
        });
    }

    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

/// Parse a JSON array of transactions
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
    debug!("Parsed {} JSON transactions", transactions.len());
    Ok(transactions)
}

/// Parse a date string, trying common export formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols, commas, and
/// parenthesized negatives
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
