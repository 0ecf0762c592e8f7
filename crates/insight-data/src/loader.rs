//! CSV file discovery and loading for Sales Insight.
//!
//! Reads delimited order exports into [`Table`]s for downstream cleaning
//! and aggregation. No transformation happens here: cells arrive as text
//! (or missing) and the header row is the schema source of truth.

use std::path::{Path, PathBuf};

use insight_core::error::{InsightError, Result};
use insight_core::schema::TableSchema;
use insight_core::table::{Row, Table, Value};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load a comma-delimited file into a [`Table`].
///
/// The first row is the header and binds columns to recognised roles by
/// name. Empty or whitespace-only cells load as [`Value::Missing`]; all
/// other cells load as text.
///
/// Fails with [`InsightError::FileNotFound`] when `path` does not exist and
/// with [`InsightError::CsvParse`] on malformed content (e.g. a record whose
/// column count differs from the header).
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(InsightError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let schema = TableSchema::from_headers(headers.iter());
    let mut table = Table::new(schema);

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let mut row = Row::default();
        for field in record.iter() {
            if field.is_empty() {
                row.push(Value::Missing);
            } else {
                row.push(Value::Text(field.to_string()));
            }
        }
        table.push_row(row);
    }

    debug!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn csv_error(path: &Path, source: csv::Error) -> InsightError {
    InsightError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
