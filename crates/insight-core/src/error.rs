use std::path::PathBuf;
use thiserror::Error;

use crate::schema::FieldRole;

/// All errors produced by the Sales Insight pipeline.
#[derive(Error, Debug)]
pub enum InsightError {
    /// The input CSV file does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Delimited content could not be parsed as a table (e.g. a record with
    /// a column count different from the header).
    #[error("Malformed CSV in {}: {}", .path.display(), .source)]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A mandatory date cell did not match any recognised format.
    #[error("Unparseable date \"{value}\" in column \"{column}\"")]
    DateParse { column: String, value: String },

    /// A column the current operation requires is absent from the schema.
    #[error("Required column missing: {0}")]
    MissingColumn(FieldRole),

    /// A chart could not be produced.
    #[error("Chart rendering failed: {0}")]
    Render(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the insight crates.
pub type Result<T> = std::result::Result<T, InsightError>;
