//! Ordinary least-squares trend fitting
//!
//! The independent variable is always the ordinal position of a point in
//! its series (0, 1, 2, ...), never elapsed calendar time. Gaps between
//! observations therefore compress in index space.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// A fitted line `value = slope * index + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
    r_squared: Option<f64>,
    observations: usize,
}

impl LinearFit {
    /// Fit a line through `values`, using each value's position as its index
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Need at least 2 points for a linear fit, got {}",
                values.len()
            )));
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Value at index {} is not finite",
                pos
            )));
        }

        let n = values.len();
        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = values.iter().mean();

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let predicted = slope * i as f64 + intercept;
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - predicted).powi(2);
        }

        // A flat series has no variance to explain.
        let r_squared = if ss_total.abs() < 1e-10 {
            None
        } else {
            Some(1.0 - ss_residual / ss_total)
        };

        Ok(Self {
            slope,
            intercept,
            r_squared,
            observations: n,
        })
    }

    /// Slope of the fitted line (change per index step)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Value of the fitted line at index 0
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination, `None` for a constant series
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Number of points the line was fitted on
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Evaluate the line at `index`
    pub fn predict(&self, index: usize) -> f64 {
        self.slope * index as f64 + self.intercept
    }

    /// Evaluate the line at the `periods` indices that follow the fitted data
    pub fn project(&self, periods: usize) -> Vec<(usize, f64)> {
        (self.observations..self.observations + periods)
            .map(|index| (index, self.predict(index)))
            .collect()
    }

    /// In-sample values of the line, one per fitted point
    pub fn fitted(&self) -> Vec<f64> {
        (0..self.observations).map(|i| self.predict(i)).collect()
    }
}
