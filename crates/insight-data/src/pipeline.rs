//! End-to-end analysis pipeline.
//!
//! Orchestrates loading, cleaning, calendar derivation and aggregation,
//! returning a [`PipelineResult`] ready for the rendering layer. Each run
//! owns its tables start to finish; nothing is cached between runs.

use std::path::Path;

use chrono::Utc;
use insight_core::error::Result;
use insight_core::schema::Measure;
use tracing::info;

use crate::aggregator::{aggregate_category, aggregate_time, CategoryBucket, TimeBucket};
use crate::cleaner::clean;
use crate::loader::load_table;
use crate::transformer::derive_calendar;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the aggregates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// The input file the run was fed.
    pub source: String,
    /// Rows read from the file before cleaning.
    pub rows_loaded: usize,
    /// Rows removed by the cleaner.
    pub rows_dropped: usize,
    /// The measure resolved from the cleaned schema.
    pub measure: Measure,
    /// Wall-clock seconds spent loading the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent cleaning and deriving calendar fields.
    pub clean_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Measure per `(year, month)`, ascending key order.
    pub monthly: Vec<TimeBucket>,
    /// Measure per category, descending measure order.
    pub by_category: Vec<CategoryBucket>,
    /// Metadata about this run.
    pub metadata: PipelineMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline against one CSV file.
///
/// 1. Load the file into a table (header row binds column roles).
/// 2. Clean: drop incomplete rows, coerce types, derive totals.
/// 3. Derive `Month` and `Year` columns.
/// 4. Resolve the measure from the cleaned schema and build both aggregates.
///
/// Any stage error aborts the run and propagates unmodified.
pub fn run_pipeline(csv_path: &Path) -> Result<PipelineResult> {
    let load_start = std::time::Instant::now();
    let raw = load_table(csv_path)?;
    let load_time = load_start.elapsed().as_secs_f64();
    let rows_loaded = raw.len();

    let clean_start = std::time::Instant::now();
    let cleaned = clean(raw)?;
    let rows_dropped = rows_loaded - cleaned.len();
    let transformed = derive_calendar(cleaned);
    let clean_time = clean_start.elapsed().as_secs_f64();

    let measure = Measure::resolve(transformed.schema());

    let aggregate_start = std::time::Instant::now();
    let monthly = aggregate_time(&transformed, measure)?;
    let by_category = aggregate_category(&transformed, measure)?;
    let aggregate_seconds = aggregate_start.elapsed().as_secs_f64();

    info!(
        "Pipeline: {} rows loaded, {} dropped, measure = {}",
        rows_loaded, rows_dropped, measure
    );

    Ok(PipelineResult {
        monthly,
        by_category,
        metadata: PipelineMetadata {
            generated_at: Utc::now().to_rfc3339(),
            source: csv_path.display().to_string(),
            rows_loaded,
            rows_dropped,
            measure,
            load_time_seconds: load_time,
            clean_time_seconds: clean_time,
            aggregate_time_seconds: aggregate_seconds,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::error::InsightError;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── Count-measure variant (report shape) ──────────────────────────────────

    #[test]
    fn test_pipeline_count_measure_scenario() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "report.csv",
            &[
                "Order ID,Date,Category",
                "1,2023-01-05,A",
                "2,2023-01-20,B",
                "3,2023-02-01,A",
            ],
        );

        let result = run_pipeline(&path).unwrap();

        assert_eq!(result.metadata.measure, Measure::OrderCount);
        assert_eq!(result.monthly.len(), 2);
        assert_eq!(
            (result.monthly[0].year, result.monthly[0].month),
            (2023, 1)
        );
        assert!((result.monthly[0].measure - 2.0).abs() < 1e-9);
        assert!((result.monthly[1].measure - 1.0).abs() < 1e-9);

        assert_eq!(result.by_category.len(), 2);
        assert_eq!(result.by_category[0].category, "A");
        assert!((result.by_category[0].measure - 2.0).abs() < 1e-9);
        assert_eq!(result.by_category[1].category, "B");
    }

    #[test]
    fn test_pipeline_drops_incomplete_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "report.csv",
            &[
                "Order ID,Date,Category",
                "1,2023-01-05,A",
                "2,2023-01-20,",
            ],
        );

        let result = run_pipeline(&path).unwrap();
        assert_eq!(result.metadata.rows_loaded, 2);
        assert_eq!(result.metadata.rows_dropped, 1);
        assert_eq!(result.by_category.len(), 1);
    }

    // ── Sales-measure variant (generic order shape) ───────────────────────────

    #[test]
    fn test_pipeline_sales_measure_variant() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "orders.csv",
            &[
                "Order Date,Quantity Ordered,Price Each,Category",
                "04/19/19 08:46,2,11.95,USB-C Cable",
                "04/07/19 22:30,1,99.99,Monitor",
                "05/01/19 09:00,3,11.95,USB-C Cable",
            ],
        );

        let result = run_pipeline(&path).unwrap();

        assert_eq!(result.metadata.measure, Measure::SalesTotal);
        assert_eq!(result.monthly.len(), 2);
        // April: 2 * 11.95 + 99.99
        assert!((result.monthly[0].measure - 123.89).abs() < 1e-9);
        // May: 3 * 11.95
        assert!((result.monthly[1].measure - 35.85).abs() < 1e-9);

        assert_eq!(result.by_category[0].category, "Monitor");
        assert!((result.by_category[0].measure - 99.99).abs() < 1e-9);
    }

    // ── Error propagation ─────────────────────────────────────────────────────

    #[test]
    fn test_pipeline_missing_file() {
        let err = run_pipeline(Path::new("/tmp/insight-pipeline-missing.csv")).unwrap_err();
        assert!(matches!(err, InsightError::FileNotFound(_)));
    }

    #[test]
    fn test_pipeline_bad_date_aborts() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "report.csv",
            &["Order ID,Date,Category", "1,never,A"],
        );

        let err = run_pipeline(&path).unwrap_err();
        assert!(matches!(err, InsightError::DateParse { .. }));
    }

    // ── Metadata ──────────────────────────────────────────────────────────────

    #[test]
    fn test_pipeline_metadata_populated() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "report.csv",
            &["Order ID,Date,Category", "1,2023-01-05,A"],
        );

        let result = run_pipeline(&path).unwrap();
        let meta = &result.metadata;
        assert!(!meta.generated_at.is_empty());
        assert!(meta.source.ends_with("report.csv"));
        assert_eq!(meta.rows_loaded, 1);
        assert_eq!(meta.rows_dropped, 0);
        assert!(meta.load_time_seconds >= 0.0);
        assert!(meta.clean_time_seconds >= 0.0);
        assert!(meta.aggregate_time_seconds >= 0.0);
    }
}
