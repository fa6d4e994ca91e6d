//! Linear trend forecaster
//!
//! Fits `value ~ slope * index + intercept` by ordinary least squares, where
//! `index` is a point's position in the series, and extends the line past
//! the last observation. Forecasts are not clamped, so a falling trend can
//! project negative sales.

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastPoint, ForecastSeries, TrainedForecastModel};
use sales_math::LinearFit;
use tracing::debug;

/// Minimum number of historical points for a fit
pub const MIN_POINTS: usize = 2;

/// Linear trend model
#[derive(Debug, Clone)]
pub struct LinearTrend {
    name: String,
}

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    name: String,
    fit: LinearFit,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self {
            name: "Linear Trend (OLS)".to_string(),
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, values: &[f64]) -> Result<Self::Trained> {
        if values.len() < MIN_POINTS {
            return Err(ForecastError::InsufficientData {
                required: MIN_POINTS,
                actual: values.len(),
            });
        }

        let fit = LinearFit::fit(values)?;
        debug!(
            slope = fit.slope(),
            intercept = fit.intercept(),
            points = fit.observations(),
            "fitted linear trend"
        );

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            fit,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearTrend {
    pub fn slope(&self) -> f64 {
        self.fit.slope()
    }

    pub fn intercept(&self) -> f64 {
        self.fit.intercept()
    }

    /// Goodness of fit, `None` when the history is flat
    pub fn r_squared(&self) -> Option<f64> {
        self.fit.r_squared()
    }

    /// Number of historical points the model was trained on
    pub fn history_len(&self) -> usize {
        self.fit.observations()
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastSeries> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon(horizon));
        }

        Ok(self
            .fit
            .project(horizon)
            .into_iter()
            .map(|(time_index, predicted_sales)| ForecastPoint {
                time_index,
                predicted_sales,
            })
            .collect())
    }

    fn fitted(&self) -> Vec<f64> {
        self.fit.fitted()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fit a linear trend to an indexed series and project `horizon` periods
///
/// `series` must be in chronological order with indices `0..len` in
/// sequence, as produced by [`crate::aggregate::indexed`].
pub fn fit_and_forecast(series: &[(usize, f64)], horizon: usize) -> Result<ForecastSeries> {
    if series.len() < MIN_POINTS {
        return Err(ForecastError::InsufficientData {
            required: MIN_POINTS,
            actual: series.len(),
        });
    }

    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon(horizon));
    }

    if let Some((position, &(index, _))) = series
        .iter()
        .enumerate()
        .find(|(position, (index, _))| position != index)
    {
        return Err(ForecastError::InvalidSeries(format!(
            "expected time index {} at position {}, found {}",
            position, position, index
        )));
    }

    if let Some(&(index, value)) = series.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ForecastError::InvalidSeries(format!(
            "value {} at time index {} is not finite",
            value, index
        )));
    }

    let values: Vec<f64> = series.iter().map(|&(_, value)| value).collect();
    forecast_values(&values, horizon)
}

/// Fit a linear trend to plain chronological values and project `horizon` periods
pub fn forecast_values(values: &[f64], horizon: usize) -> Result<ForecastSeries> {
    LinearTrend::new().train(values)?.forecast(horizon)
}
