//! Chart rendering layer for Sales Insight.
//!
//! Consumes the aggregate tables produced by `insight-data` and writes PNG
//! charts with fixed filenames into an output directory.

pub mod renderer;

pub use renderer::{ChartRenderer, PngRenderer};
