//! # Inventory Forecasting
//!
//! `inventory_forecasting` bundles the workspace crates behind one dependency:
//! [`sales_forecast`] for loading, filtering, aggregation, forecasting and
//! stock risk, and [`sales_math`] for the regression kernel underneath.
//!
//! ## Example
//!
//! ```
//! use inventory_forecasting::{dashboard_over, Granularity};
//! use inventory_forecasting::sales_forecast::sample::generate_sales;
//!
//! let session = dashboard_over(generate_sales(60, 1)).unwrap();
//! let trend = session.forecast(5, Granularity::Daily).unwrap();
//! assert_eq!(trend.forecast.len(), 5);
//! ```

pub use sales_forecast;
pub use sales_math;

pub use sales_forecast::risk::{RiskBand, StockAssessment, StockStatus};
pub use sales_forecast::session::{Granularity, TrendForecast};
pub use sales_forecast::{
    DashboardConfig, DashboardSession, DataLoader, DateRange, ForecastError, RecordStore,
    SalesRecord,
};

use std::path::Path;
use std::sync::Arc;

/// Opens a session over records already in memory.
///
/// # Examples
///
/// ```
/// use inventory_forecasting::dashboard_over;
/// use inventory_forecasting::sales_forecast::sample::generate_sales;
///
/// let session = dashboard_over(generate_sales(10, 3)).unwrap();
/// assert!(session.summary().total_orders >= 10);
/// ```
pub fn dashboard_over(records: Vec<SalesRecord>) -> Result<DashboardSession, ForecastError> {
    let store = RecordStore::new(records)?;
    Ok(DashboardSession::new(Arc::new(store)))
}

/// Loads the configured sales file and opens a session over its full span.
pub fn open_dashboard(config: &DashboardConfig) -> Result<DashboardSession, ForecastError> {
    let store = DataLoader::new()
        .with_malformed_rows(config.malformed_rows)
        .load_path(&config.data_path)?;
    Ok(DashboardSession::new(Arc::new(store)))
}

/// Reads a TOML config file and opens the dashboard it describes.
pub fn open_dashboard_from<P: AsRef<Path>>(
    config_path: P,
) -> Result<DashboardSession, ForecastError> {
    let config = DashboardConfig::load(config_path)?;
    open_dashboard(&config)
}
