mod bootstrap;

use anyhow::{anyhow, Result};
use insight_charts::{ChartRenderer, PngRenderer};
use insight_core::formatting::{format_currency, format_number, percentage};
use insight_core::schema::Measure;
use insight_core::settings::Settings;
use insight_data::pipeline::{run_pipeline, PipelineResult};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Sales Insight v{} starting", env!("CARGO_PKG_VERSION"));

    let data_path = match settings.data.clone() {
        Some(path) => path,
        None => bootstrap::discover_data_file().ok_or_else(|| {
            anyhow!("no input CSV found; pass --data <FILE> or place one under data/")
        })?,
    };
    tracing::info!("Analyzing {}", data_path.display());

    let result = run_pipeline(&data_path)?;

    let renderer = PngRenderer::default();
    let measure = result.metadata.measure;
    let monthly_chart =
        renderer.render_monthly_trend(&result.monthly, measure, &settings.output)?;
    let category_chart =
        renderer.render_category_totals(&result.by_category, measure, &settings.output)?;
    tracing::debug!(
        "Charts written: {}, {}",
        monthly_chart.display(),
        category_chart.display()
    );

    print_summary(&result);
    println!(
        "Analysis complete. Charts saved in '{}'.",
        settings.output.display()
    );

    Ok(())
}

/// Print a short run summary to stdout.
fn print_summary(result: &PipelineResult) {
    let meta = &result.metadata;
    println!(
        "Processed {} rows ({} dropped) from {}",
        format_number(meta.rows_loaded as f64, 0),
        format_number(meta.rows_dropped as f64, 0),
        meta.source
    );

    let total: f64 = result.monthly.iter().map(|b| b.measure).sum();
    match meta.measure {
        Measure::OrderCount => println!("Total orders: {}", format_number(total, 0)),
        Measure::SalesTotal => println!("Total sales: {}", format_currency(total)),
    }

    if let Some(top) = result.by_category.first() {
        println!(
            "Top category: {} ({}% of {})",
            top.category,
            percentage(top.measure, total, 1),
            meta.measure
        );
    }
}
