//! Grouping and summarising of cleaned, calendar-derived order tables.

use std::collections::{BTreeMap, HashMap};

use insight_core::error::Result;
use insight_core::schema::{FieldRole, Measure};
use insight_core::table::{Row, Table, Value};

// ── Aggregate types ───────────────────────────────────────────────────────────

/// One `(year, month)` group and its summed measure.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBucket {
    pub year: i32,
    pub month: u32,
    pub measure: f64,
}

impl TimeBucket {
    /// `"YYYY-MM"` label used on chart axes.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// One category group and its summed measure.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub category: String,
    pub measure: f64,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Group rows by `(Year, Month)`, summing `measure`.
///
/// Buckets come back in ascending natural key order; the key is unique per
/// bucket so no tie-break is needed. Fails with a missing-column error when
/// the calendar columns (or, for the sales measure, the total column) are
/// absent.
pub fn aggregate_time(table: &Table, measure: Measure) -> Result<Vec<TimeBucket>> {
    let year_idx = table.schema().require(FieldRole::Year)?;
    let month_idx = table.schema().require(FieldRole::Month)?;
    let total_idx = measure_column(table, measure)?;

    let mut groups: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for row in table.rows() {
        let (Some(year), Some(month)) = (
            row.get(year_idx).and_then(Value::as_int),
            row.get(month_idx).and_then(Value::as_int),
        ) else {
            continue;
        };
        if let Some(amount) = row_measure(row, measure, total_idx) {
            *groups.entry((year as i32, month as u32)).or_insert(0.0) += amount;
        }
    }

    Ok(groups
        .into_iter()
        .map(|((year, month), measure)| TimeBucket {
            year,
            month,
            measure,
        })
        .collect())
}

/// Group rows by category, summing `measure`.
///
/// Output is ordered by descending measure. Equal measures keep their
/// first-appearance order: accumulation preserves insertion order and the
/// sort is stable, so chart ordering is deterministic.
pub fn aggregate_category(table: &Table, measure: Measure) -> Result<Vec<CategoryBucket>> {
    let category_idx = table.schema().require(FieldRole::Category)?;
    let total_idx = measure_column(table, measure)?;

    let mut buckets: Vec<CategoryBucket> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for row in table.rows() {
        let Some(category) = row.get(category_idx).and_then(Value::as_text) else {
            continue;
        };
        let Some(amount) = row_measure(row, measure, total_idx) else {
            continue;
        };
        match slots.get(category) {
            Some(&slot) => buckets[slot].measure += amount,
            None => {
                slots.insert(category.to_string(), buckets.len());
                buckets.push(CategoryBucket {
                    category: category.to_string(),
                    measure: amount,
                });
            }
        }
    }

    buckets.sort_by(|a, b| {
        b.measure
            .partial_cmp(&a.measure)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(buckets)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Resolve the column the measure reads, if any.
fn measure_column(table: &Table, measure: Measure) -> Result<Option<usize>> {
    match measure {
        Measure::OrderCount => Ok(None),
        Measure::SalesTotal => table.schema().require(FieldRole::TotalSales).map(Some),
    }
}

/// Per-row contribution to a group. Missing totals contribute nothing.
fn row_measure(row: &Row, measure: Measure, total_idx: Option<usize>) -> Option<f64> {
    match (measure, total_idx) {
        (Measure::OrderCount, _) => Some(1.0),
        (Measure::SalesTotal, Some(idx)) => row.get(idx).and_then(Value::as_float),
        (Measure::SalesTotal, None) => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
