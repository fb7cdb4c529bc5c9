//! Fiscal-quarter labels of the form `"1Tri23"` (quarter 1 of 2023).
//!
//! The sort key is extracted structurally, not with a date parse: the
//! leading digit run is the quarter number and the trailing digit run is
//! the two-digit year, and ordering compares `(year, quarter)` as strings.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::{DashError, Result};

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\D+(\d+)$").expect("static regex"))
}

/// Sort key for one quarter label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuarterKey {
    /// Trailing digit run: the two-digit year suffix.
    pub year: String,
    /// Leading digit run: the quarter number within the year.
    pub quarter: String,
}

impl QuarterKey {
    /// Extract the sort key from a label such as `"1Tri23"`.
    pub fn parse(label: &str) -> Result<Self> {
        let caps = label_regex()
            .captures(label.trim())
            .ok_or_else(|| DashError::QuarterLabel(label.to_string()))?;
        Ok(Self {
            year: caps[2].to_string(),
            quarter: caps[1].to_string(),
        })
    }
}

/// Build the quarter label for a sale date, e.g. 2023-05-10 → `"2Tri23"`.
pub fn quarter_label(date: NaiveDate) -> String {
    let quarter = (date.month() - 1) / 3 + 1;
    format!("{}Tri{:02}", quarter, date.year() % 100)
}

/// Order labels by `(year, quarter)`; labels that do not match the pattern
/// sort last, preserving their relative order.
pub fn compare_labels(a: &str, b: &str) -> std::cmp::Ordering {
    match (QuarterKey::parse(a), QuarterKey::parse(b)) {
        (Ok(ka), Ok(kb)) => ka.cmp(&kb),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    }
}
