//! Row filtering, type coercion and derived totals.

use insight_core::coerce::{DateParser, NumberParser};
use insight_core::error::{InsightError, Result};
use insight_core::schema::FieldRole;
use insight_core::table::{Row, Table, Value};
use tracing::debug;

/// Scrub a freshly loaded table.
///
/// 1. Drops every row containing a missing cell. Unconditional: no partial
///    salvage, no default filling.
/// 2. Coerces the date column strictly — a surviving row whose date cell
///    does not parse fails the whole run with [`InsightError::DateParse`].
///    Quantity and unit-price cells are coerced leniently: unparseable
///    numbers become [`Value::Missing`] instead of aborting.
/// 3. When both a quantity and a unit-price column exist, appends a
///    `Total Sales` column holding `quantity × unit price` per row, with
///    missing numerics propagated to a missing total. Without that pair of
///    columns no total is added and downstream aggregation counts orders.
///
/// A table without a recognised date column fails with
/// [`InsightError::MissingColumn`].
pub fn clean(table: Table) -> Result<Table> {
    let date_idx = table.schema().require(FieldRole::OrderDate)?;
    let numeric_pair = match (
        table.column_index(FieldRole::Quantity),
        table.column_index(FieldRole::UnitPrice),
    ) {
        (Some(quantity), Some(price)) => Some((quantity, price)),
        _ => None,
    };
    let date_column = table.schema().columns()[date_idx].name.clone();

    let mut schema = table.schema().clone();
    if numeric_pair.is_some() {
        schema.push_column(
            FieldRole::TotalSales.canonical_name(),
            Some(FieldRole::TotalSales),
        );
    }

    let mut cleaned = Table::new(schema);
    let mut dropped = 0usize;

    for row in table.rows() {
        if row.has_missing() {
            dropped += 1;
            continue;
        }

        let mut out = Row::default();
        for (idx, value) in row.values().iter().enumerate() {
            let is_numeric = numeric_pair.is_some_and(|(q, p)| idx == q || idx == p);
            let coerced = if idx == date_idx {
                coerce_date(value, &date_column)?
            } else if is_numeric {
                coerce_number(value)
            } else {
                value.clone()
            };
            out.push(coerced);
        }

        if let Some((quantity_idx, price_idx)) = numeric_pair {
            let total = match (
                out.get(quantity_idx).and_then(Value::as_float),
                out.get(price_idx).and_then(Value::as_float),
            ) {
                (Some(quantity), Some(price)) => Value::Float(quantity * price),
                _ => Value::Missing,
            };
            out.push(total);
        }

        cleaned.push_row(out);
    }

    debug!("Cleaner dropped {} of {} rows", dropped, table.len());
    Ok(cleaned)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn coerce_date(value: &Value, column: &str) -> Result<Value> {
    let raw = value.as_text().unwrap_or_default();
    DateParser::parse(raw)
        .map(Value::Date)
        .ok_or_else(|| InsightError::DateParse {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn coerce_number(value: &Value) -> Value {
    match value.as_text().and_then(NumberParser::parse) {
        Some(n) => Value::Float(n),
        None => Value::Missing,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
