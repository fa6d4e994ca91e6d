//! # Sales Math
//!
//! Numerical building blocks for the sales forecasting crates.
//! This crate provides an ordinary least-squares trend fit over an
//! ordinal time index and a few summary statistics used by the
//! aggregation layer.

use thiserror::Error;

pub mod regression;
pub mod stats;

pub use regression::LinearFit;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for sales math operations
pub type Result<T> = std::result::Result<T, MathError>;
