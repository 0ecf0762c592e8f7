//! Calendar field derivation.

use chrono::Datelike;
use insight_core::schema::FieldRole;
use insight_core::table::{Table, Value};
use tracing::warn;

/// Append `Month` (1–12) and `Year` (four-digit) integer columns derived
/// from the date column.
///
/// Total for cleaned tables: the cleaner guarantees every surviving row
/// carries a parsed date, so there is no error path. A table without a date
/// column is returned unchanged.
pub fn derive_calendar(mut table: Table) -> Table {
    let Some(date_idx) = table.column_index(FieldRole::OrderDate) else {
        warn!("No date column bound; skipping calendar derivation");
        return table;
    };

    let mut months = Vec::with_capacity(table.len());
    let mut years = Vec::with_capacity(table.len());
    for row in table.rows() {
        match row.get(date_idx).and_then(Value::as_date) {
            Some(date) => {
                months.push(Value::Int(i64::from(date.month())));
                years.push(Value::Int(i64::from(date.year())));
            }
            None => {
                months.push(Value::Missing);
                years.push(Value::Missing);
            }
        }
    }

    table.add_column(FieldRole::Month.canonical_name(), Some(FieldRole::Month), months);
    table.add_column(FieldRole::Year.canonical_name(), Some(FieldRole::Year), years);
    table
}

// ── Tests ─────────────────────────────────────────────────────────────────────
