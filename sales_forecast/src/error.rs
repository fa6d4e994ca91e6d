//! Error types for the sales_forecast crate

use sales_math::MathError;
use thiserror::Error;

/// Failure to build a record store from an input source
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited data could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A row has an unparsable date or amount
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// An in-memory record breaks the stored field rules
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The source holds no usable records
    #[error("No sales records found in source")]
    Empty,
}

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error raised while loading the record store
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Too few points to fit a trend
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Forecast horizon must be positive
    #[error("Invalid horizon {0}: must be at least 1 period")]
    InvalidHorizon(usize),

    /// Requested horizon lies outside the configured bounds
    #[error("Horizon {horizon} is outside the allowed range {min}..={max}")]
    HorizonOutOfRange {
        horizon: usize,
        min: usize,
        max: usize,
    },

    /// Stock capacity must be positive
    #[error("Invalid stock capacity {0}: must be greater than zero")]
    InvalidCapacity(f64),

    /// Series handed to the forecaster violates its shape contract
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV serialization
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from configuration parsing or validation
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Io(err.into())
    }
}
