//! Error types for loading, filtering and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the launch records file.
///
/// Every variant is fatal: the loader never hands out a partial dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data source {} not found or unreadable", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("row {row}: booster version {booster_version:?} has no category token")]
    MalformedRecord { row: usize, booster_version: String },
    #[error("row {row}: outcome class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: f64 },
    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: String },
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// A payload range whose bounds are out of order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("payload range is inverted: min {min} > max {max}")]
    Inverted { min: f64, max: f64 },
}

/// Errors raised while reading or validating `dashboard.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid initial payload range: {0}")]
    InitialRange(#[from] RangeError),
    #[error("initial payload range [{min}, {max}] lies outside the slider domain [{lo}, {hi}]")]
    OutOfDomain { min: f64, max: f64, lo: f64, hi: f64 },
    #[error("slider step must be positive, got {0}")]
    Step(f64),
}
