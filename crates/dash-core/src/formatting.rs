/// Format a floating-point number with Brazilian separators (`.` for
/// thousands, `,` for decimals) and a fixed number of decimal places.
///
/// # Examples
///
/// ```
/// use dash_core::formatting::format_number_brl;
///
/// assert_eq!(format_number_brl(1234.5, 1), "1.234,5");
/// assert_eq!(format_number_brl(1234567.0, 0), "1.234.567");
/// assert_eq!(format_number_brl(0.0, 2), "0,00");
/// assert_eq!(format_number_brl(-9876.5, 1), "-9.876,5");
/// ```
pub fn format_number_brl(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places, nudging past IEEE 754
    // midpoint representation issues.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // "0.50" → keep only the digits after the point, comma-separated.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{},{}", grouped, &frac_str[2..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount as a BRL string with two decimal places.
///
/// # Examples
///
/// ```
/// use dash_core::formatting::format_currency_brl;
///
/// assert_eq!(format_currency_brl(1234.56), "R$ 1.234,56");
/// assert_eq!(format_currency_brl(0.0), "R$ 0,00");
/// ```
pub fn format_currency_brl(amount: f64) -> String {
    format!("R$ {}", format_number_brl(amount, 2))
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimal_places as i32);
    ((part / whole) * 100.0 * factor).round() / factor
}

/// Insert `.` thousands separators into a bare digit string.
fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*b as char);
    }
    out
}
