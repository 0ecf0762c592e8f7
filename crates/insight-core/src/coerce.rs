use chrono::{NaiveDate, NaiveDateTime};

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses calendar dates from the variety of spellings found in order CSVs.
pub struct DateParser;

impl DateParser {
    /// Attempt to parse a raw cell into a [`NaiveDate`].
    ///
    /// Tries, in order: ISO dates, US-style dates with four- then two-digit
    /// years, then date-time forms whose time portion is discarded. Returns
    /// `None` for empty or unrecognised input; the caller decides whether
    /// that is fatal.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        // Two-digit-year formats must come before `%Y`: chrono's `%Y`
        // accepts variable-length years and would read "04/30/22" as the
        // year 22.
        const DATE_FORMATS: &[&str] = &[
            "%Y-%m-%d",
            "%Y/%m/%d",
            "%m/%d/%y",
            "%m-%d-%y",
            "%m/%d/%Y",
            "%m-%d-%Y",
        ];
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(date);
            }
        }

        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%m/%d/%y %H:%M",
            "%m/%d/%Y %H:%M",
        ];
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt.date());
            }
        }

        // RFC 3339 timestamps (exported APIs sometimes produce these).
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }

        None
    }
}

// ── NumberParser ──────────────────────────────────────────────────────────────

/// Lenient numeric coercion for quantity and price columns.
pub struct NumberParser;

impl NumberParser {
    /// Attempt to parse a raw cell into an `f64`.
    ///
    /// Accepts an optional leading `$` and thousands separators. Returns
    /// `None` for empty, non-numeric, or non-finite input — callers treat
    /// that as a missing numeric rather than an error.
    pub fn parse(raw: &str) -> Option<f64> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        let s = s.strip_prefix('$').unwrap_or(s);
        let cleaned = s.replace(',', "");
        cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
