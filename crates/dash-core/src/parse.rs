//! Cell-level value parsing for the loader.
//!
//! Mirrors the cleaning contract of the pipeline: unparseable dates and
//! amounts become `None` (the row is then dropped upstream), while blank
//! categorical cells are replaced with the sentinel label.

use chrono::NaiveDate;

use crate::models::NOT_INFORMED;

/// Day-first date formats accepted by the loader, tried in order.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d/%m/%y", "%d-%m-%Y"];

/// Parse a day-first date cell. Returns `None` for anything unparseable.
pub fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Parse a monetary cell using the two-pass coercion.
///
/// Pass one is a direct `f64` parse, so already-numeric exports (`"1234.56"`)
/// go through untouched. Pass two strips the `R$` prefix and spaces, removes
/// `.` thousands separators and converts the `,` decimal separator, turning
/// `"R$ 1.234,56"` into `1234.56`. Values failing both passes yield `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }

    let stripped = trimmed
        .strip_prefix("R$")
        .unwrap_or(trimmed)
        .replace(' ', "")
        .replace('.', "")
        .replace(',', ".");
    stripped.parse::<f64>().ok()
}

/// Normalise a categorical cell, mapping blanks to the sentinel label.
pub fn fill_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NOT_INFORMED.to_string()
    } else {
        trimmed.to_string()
    }
}
