//! Display formatting helpers for the CLI summary output.

/// Format a floating-point number with thousands separators and a fixed
/// number of decimal places.
///
/// # Examples
///
/// ```
/// use insight_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let rendered = format!("{value:.decimals$}");
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part.as_str()),
    };

    let grouped = group_thousands(digits);
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a monetary amount as a USD string with two decimal places.
///
/// # Examples
///
/// ```
/// use insight_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "$1,234.56");
/// assert_eq!(format_currency(0.0), "$0.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_number(amount, 2))
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` when `whole` is zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimal_places as i32);
    ((part / whole) * 100.0 * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.into_iter().rev().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
