//! Query facade for one interactive dashboard session
//!
//! A session owns the current date range and the records it selects. The
//! record store is shared read-only, so any number of sessions can work off
//! one load.

use crate::aggregate::{
    by_category, by_product, daily_series, indexed, monthly_series, sum_by, summarize,
    top_n_by_sales, AggregateResult, PeriodSeries, SalesSummary,
};
use crate::data::{DateRange, RecordStore, SalesRecord};
use crate::error::Result;
use crate::export::records_to_csv;
use crate::models::linear_trend::fit_and_forecast;
use crate::models::ForecastSeries;
use crate::risk::{assess_stock, StockAssessment};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Series granularity the forecaster regresses on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One point per order date
    #[default]
    Daily,
    /// One point per calendar month
    Monthly,
}

/// History and projection returned by [`DashboardSession::forecast`]
#[derive(Debug, Clone, Serialize)]
pub struct TrendForecast {
    pub granularity: Granularity,
    pub history: PeriodSeries,
    pub forecast: ForecastSeries,
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    store: Arc<RecordStore>,
    range: DateRange,
    filtered: Vec<SalesRecord>,
}

impl DashboardSession {
    /// Open a session covering the full span of the store
    pub fn new(store: Arc<RecordStore>) -> Self {
        let range = store
            .span()
            .unwrap_or_else(|| DateRange::single_day(NaiveDate::default()));
        let filtered = store.query(&range);
        Self {
            store,
            range,
            filtered,
        }
    }

    /// Change the selected date range and refresh the selection
    pub fn set_range(&mut self, range: DateRange) {
        if range == self.range {
            return;
        }
        self.filtered = self.store.query(&range);
        self.range = range;
        debug!(range = %self.range, records = self.filtered.len(), "range updated");
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Records inside the current range
    pub fn records(&self) -> &[SalesRecord] {
        &self.filtered
    }

    pub fn summary(&self) -> SalesSummary {
        summarize(&self.filtered)
    }

    pub fn category_sales(&self) -> AggregateResult<String> {
        sum_by(&self.filtered, by_category)
    }

    pub fn top_products(&self, n: usize) -> Vec<(String, f64)> {
        top_n_by_sales(&self.filtered, by_product, n)
    }

    pub fn monthly_sales(&self) -> PeriodSeries {
        monthly_series(&self.filtered)
    }

    /// Project sales `horizon` periods past the selected history
    pub fn forecast(&self, horizon: usize, granularity: Granularity) -> Result<TrendForecast> {
        let history = match granularity {
            Granularity::Daily => daily_series(&self.filtered),
            Granularity::Monthly => monthly_series(&self.filtered),
        };
        let forecast = fit_and_forecast(&indexed(&history), horizon)?;
        Ok(TrendForecast {
            granularity,
            history,
            forecast,
        })
    }

    /// Compare total sales in range against `capacity`
    pub fn stock(&self, capacity: f64) -> Result<StockAssessment> {
        assess_stock(self.summary().total_sales, capacity)
    }

    /// Current selection in the store's CSV layout
    pub fn export_csv(&self) -> Result<String> {
        records_to_csv(&self.filtered)
    }
}
