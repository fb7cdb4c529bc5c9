//! CSV loading and cleaning for the sales dashboard.
//!
//! Reads the raw transaction export, detects the field delimiter, validates
//! the configured column names against the header and converts rows into
//! cleaned [`Transaction`] values for downstream aggregation.

use std::path::Path;

use chrono::Datelike;
use csv::StringRecord;
use dash_core::columns::{ColumnConfig, ColumnIndex};
use dash_core::error::{DashError, Result};
use dash_core::models::Transaction;
use dash_core::parse::{fill_category, parse_amount, parse_day_first_date};
use dash_core::quarter::quarter_label;
use tracing::{debug, info, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and clean the transaction export at `path`.
///
/// Fatal conditions: a missing file and a header that does not contain every
/// configured column (the error lists missing vs. found names). Individual
/// rows with an unparseable date or amount are dropped silently; the final
/// read/dropped/kept counts are logged for operator visibility.
pub fn load_transactions(path: &Path, config: &ColumnConfig) -> Result<Vec<Transaction>> {
    if !path.exists() {
        return Err(DashError::InputNotFound(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path).map_err(|source| DashError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let transactions = load_from_str(&raw, config)?;

    if transactions.is_empty() {
        warn!("No valid rows left after cleaning {}", path.display());
    }

    Ok(transactions)
}

/// Parse and clean transactions from raw CSV text.
///
/// Split out from [`load_transactions`] so tests can run without a file.
pub fn load_from_str(raw: &str, config: &ColumnConfig) -> Result<Vec<Transaction>> {
    let delimiter = detect_delimiter(raw);
    debug!("Using {:?} as field delimiter", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let index = config.resolve(&headers)?;

    let (transactions, stats) = clean_records(&mut reader, &index);

    info!(
        "Cleaned input: {} rows read, {} dropped, {} kept",
        stats.rows_read,
        stats.rows_dropped,
        transactions.len()
    );

    Ok(transactions)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Row accounting for the cleaning pass.
///
/// Every record the reader yields counts as read, including records the CSV
/// parser itself rejects, so `rows_read == rows_dropped + kept` always holds.
#[derive(Debug, Default, Clone, Copy)]
struct CleanStats {
    rows_read: u64,
    rows_dropped: u64,
}

/// Run the cleaning pass over every data record.
fn clean_records(
    reader: &mut csv::Reader<&[u8]>,
    index: &ColumnIndex,
) -> (Vec<Transaction>, CleanStats) {
    let mut stats = CleanStats::default();
    let mut transactions = Vec::new();

    for record in reader.records() {
        stats.rows_read += 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!("Skipping unreadable CSV record: {}", e);
                stats.rows_dropped += 1;
                continue;
            }
        };

        match clean_row(&record, index) {
            Some(tx) => transactions.push(tx),
            None => stats.rows_dropped += 1,
        }
    }

    (transactions, stats)
}

/// Trial-parse delimiter detection.
///
/// The export uses either `;` or `,`. Splitting the header with `;` and
/// getting a single field back means the semicolon attempt failed, so the
/// loader falls back to a comma.
fn detect_delimiter(raw: &str) -> u8 {
    let header = raw.lines().next().unwrap_or("");
    if header.split(';').count() > 1 {
        b';'
    } else {
        b','
    }
}

/// Convert one raw record into a cleaned [`Transaction`].
///
/// Returns `None` when the date or amount cell fails to parse, or when a
/// configured quarter column has a blank cell. Categorical blanks are
/// sentinel-filled instead of dropping the row.
fn clean_row(record: &StringRecord, index: &ColumnIndex) -> Option<Transaction> {
    let cell = |i: usize| record.get(i).unwrap_or("");

    let sale_date = parse_day_first_date(cell(index.date))?;
    let amount = parse_amount(cell(index.amount))?;

    let quarter = match index.quarter {
        Some(i) => {
            let value = cell(i).trim();
            if value.is_empty() {
                // Quarter is a required grouping key once configured.
                return None;
            }
            value.to_string()
        }
        None => quarter_label(sale_date),
    };

    Some(Transaction {
        sale_date,
        amount,
        region: fill_category(cell(index.region)),
        consultant: fill_category(cell(index.consultant)),
        business_unit: fill_category(cell(index.business_unit)),
        contract_type: index.contract_type.map(|i| fill_category(cell(i))),
        partner: index.partner.map(|i| fill_category(cell(i))),
        goal: index.goal.and_then(|i| parse_amount(cell(i))),
        quarter_label: quarter,
        year: sale_date.year(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
