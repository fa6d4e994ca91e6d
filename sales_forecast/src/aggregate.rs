//! Grouped aggregates over filtered sales records
//!
//! Every function here is pure and returns an empty result for an empty
//! input. Group keys live in a `BTreeMap`, so iteration order is the key
//! order and output is deterministic.

use crate::data::SalesRecord;
use crate::utils::month_start;
use chrono::NaiveDate;
use sales_math::stats::{mean, round_to};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Group key to aggregated value
pub type AggregateResult<K> = BTreeMap<K, f64>;

/// Chronological `(period start, total sales)` pairs
pub type PeriodSeries = Vec<(NaiveDate, f64)>;

/// Numeric column an aggregate is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    Sales,
    Profit,
}

impl Measure {
    pub fn of(&self, record: &SalesRecord) -> f64 {
        match self {
            Measure::Sales => record.sales,
            Measure::Profit => record.profit,
        }
    }
}

/// Key extractor grouping by category
pub fn by_category(record: &SalesRecord) -> String {
    record.category.clone()
}

/// Key extractor grouping by product name
pub fn by_product(record: &SalesRecord) -> String {
    record.product_name.clone()
}

/// Two-dimensional key extractor: (category, product name)
pub fn by_category_and_product(record: &SalesRecord) -> (String, String) {
    (record.category.clone(), record.product_name.clone())
}

/// Sum sales per group
pub fn sum_by<K, F>(records: &[SalesRecord], key_fn: F) -> AggregateResult<K>
where
    K: Ord,
    F: Fn(&SalesRecord) -> K,
{
    sum_measure_by(records, key_fn, Measure::Sales)
}

/// Sum an arbitrary measure per group
pub fn sum_measure_by<K, F>(records: &[SalesRecord], key_fn: F, measure: Measure) -> AggregateResult<K>
where
    K: Ord,
    F: Fn(&SalesRecord) -> K,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key_fn(record)).or_insert(0.0) += measure.of(record);
    }
    totals
}

/// Average sales per group
pub fn mean_by<K, F>(records: &[SalesRecord], key_fn: F) -> AggregateResult<K>
where
    K: Ord,
    F: Fn(&SalesRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().push(record.sales);
    }

    groups
        .into_iter()
        .filter_map(|(key, values)| mean(&values).map(|avg| (key, avg)))
        .collect()
}

/// The `n` groups with the largest sales, descending
///
/// Equal totals are ordered by ascending key.
pub fn top_n_by_sales<K, F>(records: &[SalesRecord], key_fn: F, n: usize) -> Vec<(K, f64)>
where
    K: Ord,
    F: Fn(&SalesRecord) -> K,
{
    let mut ranked: Vec<(K, f64)> = sum_by(records, key_fn).into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Sales summed per calendar month, keyed by the first day of the month
///
/// Months without records are absent, not zero-filled.
pub fn monthly_series(records: &[SalesRecord]) -> PeriodSeries {
    sum_by(records, |record| month_start(record.order_date))
        .into_iter()
        .collect()
}

/// Sales summed per order date
///
/// Days without records are absent, not zero-filled.
pub fn daily_series(records: &[SalesRecord]) -> PeriodSeries {
    sum_by(records, |record| record.order_date)
        .into_iter()
        .collect()
}

/// Attach the ordinal time index used by the trend forecaster
pub fn indexed(series: &[(NaiveDate, f64)]) -> Vec<(usize, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(index, &(_, value))| (index, value))
        .collect()
}

/// Headline figures for a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_orders: usize,
}

/// Total sales, total profit and order count
pub fn summarize(records: &[SalesRecord]) -> SalesSummary {
    records.iter().fold(SalesSummary::default(), |acc, record| SalesSummary {
        total_sales: acc.total_sales + record.sales,
        total_profit: acc.total_profit + record.profit,
        total_orders: acc.total_orders + 1,
    })
}

impl fmt::Display for SalesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sales Summary:")?;
        writeln!(f, "  Total Sales:   {:.2}", round_to(self.total_sales, 2))?;
        writeln!(f, "  Total Profit:  {:.2}", round_to(self.total_profit, 2))?;
        writeln!(f, "  Total Orders:  {}", self.total_orders)?;
        Ok(())
    }
}
