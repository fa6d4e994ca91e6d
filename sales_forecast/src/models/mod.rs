//! Forecasting models for sales series

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One projected period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Ordinal position, continuing after the historical series
    pub time_index: usize,
    /// Projected sales for that position
    pub predicted_sales: f64,
}

/// Projected periods in index order
pub type ForecastSeries = Vec<ForecastPoint>;

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizon: usize) -> Result<ForecastSeries>;

    /// In-sample predictions for the training series
    fn fitted(&self) -> Vec<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a chronological series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on values in chronological order
    fn train(&self, values: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod linear_trend;
