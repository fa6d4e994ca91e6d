//! Dashboard configuration
//!
//! Loaded from a TOML file; every key is optional and falls back to the
//! defaults the dashboard ships with.
//!
//! ```toml
//! data_path = "Superstore.csv"
//! malformed_rows = "skip"
//!
//! [forecast]
//! default_horizon = 10
//! min_horizon = 5
//! max_horizon = 60
//!
//! [stock]
//! default_capacity = 100000.0
//!
//! [dashboard]
//! top_products = 5
//! ```

use crate::data::MalformedRows;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Sales file loaded at startup
    pub data_path: PathBuf,
    /// Handling of rows with bad dates or amounts
    pub malformed_rows: MalformedRows,
    pub forecast: ForecastConfig,
    pub stock: StockConfig,
    pub dashboard: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub default_horizon: usize,
    pub min_horizon: usize,
    pub max_horizon: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    pub default_capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows in the best-selling products table
    pub top_products: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Superstore.csv"),
            malformed_rows: MalformedRows::Fail,
            forecast: ForecastConfig::default(),
            stock: StockConfig::default(),
            dashboard: ViewConfig::default(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon: 10,
            min_horizon: 5,
            max_horizon: 60,
        }
    }
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            default_capacity: 100_000.0,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { top_products: 5 }
    }
}

impl DashboardConfig {
    /// Read and validate a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let forecast = &self.forecast;
        if forecast.min_horizon == 0 {
            return Err(ForecastError::Config(
                "forecast.min_horizon must be at least 1".to_string(),
            ));
        }
        if forecast.min_horizon > forecast.max_horizon {
            return Err(ForecastError::Config(format!(
                "forecast.min_horizon ({}) exceeds forecast.max_horizon ({})",
                forecast.min_horizon, forecast.max_horizon
            )));
        }
        if !(forecast.min_horizon..=forecast.max_horizon).contains(&forecast.default_horizon) {
            return Err(ForecastError::Config(format!(
                "forecast.default_horizon ({}) is outside {}..={}",
                forecast.default_horizon, forecast.min_horizon, forecast.max_horizon
            )));
        }
        if !(self.stock.default_capacity.is_finite() && self.stock.default_capacity > 0.0) {
            return Err(ForecastError::Config(format!(
                "stock.default_capacity ({}) must be greater than zero",
                self.stock.default_capacity
            )));
        }
        Ok(())
    }

    /// Check a requested horizon against the configured bounds
    pub fn check_horizon(&self, horizon: usize) -> Result<usize> {
        if horizon < self.forecast.min_horizon || horizon > self.forecast.max_horizon {
            return Err(ForecastError::HorizonOutOfRange {
                horizon,
                min: self.forecast.min_horizon,
                max: self.forecast.max_horizon,
            });
        }
        Ok(horizon)
    }
}
