//! Synthetic sales data for demos and tests

use crate::data::SalesRecord;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CATALOG: [(&str, &[&str]); 3] = [
    (
        "Furniture",
        &["Bretford Conference Table", "Hon Task Chair", "Sauder Bookcase"],
    ),
    (
        "Office Supplies",
        &["Avery Binder", "Xerox Copy Paper", "Staple Envelope"],
    ),
    (
        "Technology",
        &["Logitech Wireless Mouse", "Canon Copier", "Apple Smart Phone"],
    ),
];

/// Generate `days` days of orders starting 2016-01-01
///
/// The same seed always yields the same records. Daily volume drifts
/// upward so the series carries a visible trend.
pub fn generate_sales(days: usize, seed: u64) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or_default();
    let mut records = Vec::new();

    for day in 0..days {
        let date = start + Duration::days(day as i64);
        let orders = rng.gen_range(1..=4);

        for _ in 0..orders {
            let (category, products) = CATALOG[rng.gen_range(0..CATALOG.len())];
            let product = products[rng.gen_range(0..products.len())];

            let base = rng.gen_range(20.0..400.0);
            let sales = ((base + day as f64 * 0.5) * 100.0).round() / 100.0;
            let margin = rng.gen_range(-0.2..0.35);
            let profit = (sales * margin * 100.0).round() / 100.0;

            records.push(SalesRecord::new(date, category, product, sales, profit));
        }
    }

    records
}
