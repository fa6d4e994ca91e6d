//! # Sales Forecast
//!
//! Filtering, aggregation, trend forecasting and stock risk scoring over a
//! static table of retail orders.
//!
//! ## Features
//!
//! - Sales record loading from delimited files (UTF-8 or Latin-1)
//! - Inclusive date-range filtering backed by a date index
//! - Grouped sums and means by category, product, month and day
//! - Linear trend forecasting over an ordinal time index
//! - Stock risk scores with stable / moderate / high bands
//! - CSV export of records, aggregates and series
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_forecast::aggregate::{by_category, indexed, monthly_series, sum_by};
//! use sales_forecast::data::{filter, DataLoader, DateRange};
//! use sales_forecast::models::linear_trend::fit_and_forecast;
//! use sales_forecast::risk::{risk_score, RiskBand};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load data
//! let store = DataLoader::from_csv("Superstore.csv")?;
//! let span = store.span().expect("store is never empty");
//!
//! // Narrow to the first year
//! let range = DateRange::new(span.start(), span.start() + chrono::Duration::days(364));
//! let records = filter(store.records(), &range);
//!
//! // Aggregate
//! let by_cat = sum_by(&records, by_category);
//! let monthly = monthly_series(&records);
//!
//! // Forecast three months ahead
//! let forecast = fit_and_forecast(&indexed(&monthly), 3)?;
//!
//! // Score stock pressure
//! let demand: f64 = by_cat.values().sum();
//! let score = risk_score(demand, 100_000.0)?;
//! println!("{} -> {:?}", score, RiskBand::from_score(score));
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod models;
pub mod risk;
pub mod sample;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use crate::config::DashboardConfig;
pub use crate::data::{DataLoader, DateRange, RecordStore, SalesRecord};
pub use crate::error::{ForecastError, LoadError};
pub use crate::models::{ForecastModel, ForecastPoint, ForecastSeries, TrainedForecastModel};
pub use crate::session::DashboardSession;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
