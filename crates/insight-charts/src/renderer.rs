//! Chart rendering for aggregate tables.
//!
//! The pipeline treats rendering as an external collaborator: it hands the
//! renderer its aggregates plus an output directory, and the renderer writes
//! one image per chart under a fixed filename, creating the directory if
//! absent.

use std::path::{Path, PathBuf};

use insight_core::error::{InsightError, Result};
use insight_core::schema::Measure;
use insight_data::aggregator::{CategoryBucket, TimeBucket};
use plotters::prelude::*;
use tracing::info;

// ── ChartRenderer ─────────────────────────────────────────────────────────────

/// Boundary between the pipeline and whatever produces chart files.
pub trait ChartRenderer {
    /// Write the monthly trend chart, returning the path of the written file.
    fn render_monthly_trend(
        &self,
        series: &[TimeBucket],
        measure: Measure,
        output_dir: &Path,
    ) -> Result<PathBuf>;

    /// Write the per-category chart, returning the path of the written file.
    fn render_category_totals(
        &self,
        totals: &[CategoryBucket],
        measure: Measure,
        output_dir: &Path,
    ) -> Result<PathBuf>;
}

// ── Fixed filenames and titles ────────────────────────────────────────────────

/// Filename of the monthly trend chart for `measure`.
pub fn monthly_chart_filename(measure: Measure) -> &'static str {
    match measure {
        Measure::OrderCount => "monthly_order_count_trend.png",
        Measure::SalesTotal => "monthly_sales_trend.png",
    }
}

/// Filename of the category chart for `measure`.
pub fn category_chart_filename(measure: Measure) -> &'static str {
    match measure {
        Measure::OrderCount => "category_order_count.png",
        Measure::SalesTotal => "category_sales.png",
    }
}

fn monthly_chart_title(measure: Measure) -> &'static str {
    match measure {
        Measure::OrderCount => "Monthly Order Count Trend",
        Measure::SalesTotal => "Monthly Sales Trend",
    }
}

fn category_chart_title(measure: Measure) -> &'static str {
    match measure {
        Measure::OrderCount => "Order Count by Product Category",
        Measure::SalesTotal => "Sales by Product Category",
    }
}

// ── PngRenderer ───────────────────────────────────────────────────────────────

/// Renders aggregates to PNG files via the `plotters` bitmap backend.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl ChartRenderer for PngRenderer {
    fn render_monthly_trend(
        &self,
        series: &[TimeBucket],
        measure: Measure,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(monthly_chart_filename(measure));
        self.draw_monthly(&path, series, measure)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    fn render_category_totals(
        &self,
        totals: &[CategoryBucket],
        measure: Measure,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(category_chart_filename(measure));
        self.draw_category(&path, totals, measure)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}

impl PngRenderer {
    fn draw_monthly(&self, path: &Path, series: &[TimeBucket], measure: Measure) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let slots = series.len().max(1);
        let labels: Vec<String> = series.iter().map(TimeBucket::label).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(monthly_chart_title(measure), ("sans-serif", 28).into_font())
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..y_ceiling(series.iter().map(|b| b.measure)))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots.min(24))
            .x_label_formatter(&|x| slot_label(&labels, x))
            .y_desc(measure.axis_label())
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                series
                    .iter()
                    .enumerate()
                    .map(|(i, b)| (i as f64, b.measure)),
                &BLUE,
            ))
            .map_err(render_err)?;
        chart
            .draw_series(
                series
                    .iter()
                    .enumerate()
                    .map(|(i, b)| Circle::new((i as f64, b.measure), 4, BLUE.filled())),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn draw_category(&self, path: &Path, totals: &[CategoryBucket], measure: Measure) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let slots = totals.len().max(1);
        let labels: Vec<String> = totals.iter().map(|b| b.category.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(category_chart_title(measure), ("sans-serif", 28).into_font())
            .margin(16)
            .x_label_area_size(64)
            .y_label_area_size(64)
            .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..y_ceiling(totals.iter().map(|b| b.measure)))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_label_formatter(&|x| slot_label(&labels, x))
            .y_desc(measure.axis_label())
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(totals.iter().enumerate().map(|(i, b)| {
                Rectangle::new(
                    [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, b.measure)],
                    BLUE.mix(0.6).filled(),
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Upper bound of the y axis: 10% headroom above the maximum, or 1.0 for
/// empty/zero data so the axis range never degenerates.
fn y_ceiling(measures: impl Iterator<Item = f64>) -> f64 {
    let max = measures.fold(0.0f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Axis label for the slot nearest to `x`, or empty when out of range.
fn slot_label(labels: &[String], x: &f64) -> String {
    let idx = x.round() as isize;
    if idx >= 0 && (idx as usize) < labels.len() {
        labels[idx as usize].clone()
    } else {
        String::new()
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> InsightError {
    InsightError::Render(err.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
