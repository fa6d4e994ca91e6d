//! Sales record storage, loading and date-range filtering

use crate::error::LoadError;
use crate::utils::{date_parser, decode_text};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column headers of the sales schema, in export order
pub const ORDER_DATE: &str = "Order Date";
pub const CATEGORY: &str = "Category";
pub const PRODUCT_NAME: &str = "Product Name";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";

/// A single sales transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date the order was placed
    #[serde(rename = "Order Date")]
    pub order_date: NaiveDate,
    /// Product category
    #[serde(rename = "Category")]
    pub category: String,
    /// Product name
    #[serde(rename = "Product Name")]
    pub product_name: String,
    /// Sales amount, never negative
    #[serde(rename = "Sales")]
    pub sales: f64,
    /// Profit amount, may be negative
    #[serde(rename = "Profit")]
    pub profit: f64,
}

impl SalesRecord {
    /// Create a new sales record
    pub fn new(
        order_date: NaiveDate,
        category: impl Into<String>,
        product_name: impl Into<String>,
        sales: f64,
        profit: f64,
    ) -> Self {
        Self {
            order_date,
            category: category.into(),
            product_name: product_name.into(),
            sales,
            profit,
        }
    }

    /// Check the field rules every stored record obeys
    ///
    /// Names must hold a non-blank value, amounts must be finite and sales
    /// must not be negative.
    pub fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("empty category".to_string());
        }
        if self.product_name.trim().is_empty() {
            return Err("empty product name".to_string());
        }
        if !self.sales.is_finite() {
            return Err(format!("invalid sales amount '{}'", self.sales));
        }
        if self.sales < 0.0 {
            return Err(format!("negative sales amount {}", self.sales));
        }
        if !self.profit.is_finite() {
            return Err(format!("invalid profit amount '{}'", self.profit));
        }
        Ok(())
    }
}

/// Inclusive interval of calendar dates
///
/// A range whose start lies after its end is valid but matches nothing;
/// the bounds are never swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one day
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True when `start > end`
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Keep the records whose order date falls inside `range`, in input order
pub fn filter(records: &[SalesRecord], range: &DateRange) -> Vec<SalesRecord> {
    if range.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| range.contains(record.order_date))
        .cloned()
        .collect()
}

/// What to do with a row whose date or amounts cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRows {
    /// Abort the load at the first bad row
    #[default]
    Fail,
    /// Drop bad rows and count them in the load report
    Skip,
}

/// Row counts gathered while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows read from the source
    pub rows_read: usize,
    /// Rows that became records
    pub loaded: usize,
    /// Rows dropped under `MalformedRows::Skip`
    pub skipped: usize,
}

/// Immutable table of sales records with a date index
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<SalesRecord>,
    /// Record positions ordered by (order_date, position)
    by_date: Vec<usize>,
    report: LoadReport,
}

impl RecordStore {
    /// Build a store from records already in memory
    ///
    /// Fails on the first record that breaks [`SalesRecord::validate`].
    pub fn new(records: Vec<SalesRecord>) -> Result<Self, LoadError> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| LoadError::InvalidRecord { index, reason })?;
        }

        let report = LoadReport {
            rows_read: records.len(),
            loaded: records.len(),
            skipped: 0,
        };
        Self::with_report(records, report)
    }

    fn with_report(records: Vec<SalesRecord>, report: LoadReport) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut by_date: Vec<usize> = (0..records.len()).collect();
        // Stable sort keeps equal dates in load order.
        by_date.sort_by_key(|&i| records[i].order_date);

        Ok(Self {
            records,
            by_date,
            report,
        })
    }

    /// All records in load order
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row counts from the load that produced this store
    pub fn report(&self) -> LoadReport {
        self.report
    }

    /// Earliest and latest order date
    pub fn span(&self) -> Option<DateRange> {
        let first = *self.by_date.first()?;
        let last = *self.by_date.last()?;
        Some(DateRange::new(
            self.records[first].order_date,
            self.records[last].order_date,
        ))
    }

    /// Records inside `range`, in load order
    ///
    /// Returns the same sequence as [`filter`] over [`RecordStore::records`]
    /// but locates the matching dates by binary search.
    pub fn query(&self, range: &DateRange) -> Vec<SalesRecord> {
        if range.is_empty() {
            return Vec::new();
        }

        let lo = self
            .by_date
            .partition_point(|&i| self.records[i].order_date < range.start());
        let hi = self
            .by_date
            .partition_point(|&i| self.records[i].order_date <= range.end());

        let mut hits = self.by_date[lo..hi].to_vec();
        hits.sort_unstable();

        debug!(range = %range, matched = hits.len(), "queried record store");
        hits.into_iter().map(|i| self.records[i].clone()).collect()
    }
}

/// Column positions of the required fields in a header row
struct ColumnMap {
    order_date: usize,
    category: usize,
    product_name: usize,
    sales: usize,
    profit: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            order_date: find(ORDER_DATE)?,
            category: find(CATEGORY)?,
            product_name: find(PRODUCT_NAME)?,
            sales: find(SALES)?,
            profit: find(PROFIT)?,
        })
    }

    fn parse(&self, row: &StringRecord) -> Result<SalesRecord, String> {
        let field = |index: usize, name: &str| {
            row.get(index)
                .ok_or_else(|| format!("missing '{}' field", name))
        };

        let raw_date = field(self.order_date, ORDER_DATE)?.trim();
        let order_date = date_parser::parse_date(raw_date)
            .ok_or_else(|| format!("invalid order date '{}'", raw_date))?;

        // Names are kept as written so an export reloads unchanged.
        let record = SalesRecord {
            order_date,
            category: field(self.category, CATEGORY)?.to_string(),
            product_name: field(self.product_name, PRODUCT_NAME)?.to_string(),
            sales: parse_amount(field(self.sales, SALES)?, SALES)?,
            profit: parse_amount(field(self.profit, PROFIT)?, PROFIT)?,
        };
        record.validate()?;
        Ok(record)
    }
}

fn parse_amount(raw: &str, name: &str) -> Result<f64, String> {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("invalid {} amount '{}'", name.to_lowercase(), raw)),
    }
}

/// Data loader for delimited sales files
#[derive(Debug, Clone, Copy, Default)]
pub struct DataLoader {
    malformed_rows: MalformedRows,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how rows with bad dates or amounts are handled
    pub fn with_malformed_rows(mut self, policy: MalformedRows) -> Self {
        self.malformed_rows = policy;
        self
    }

    /// Load a sales file, failing on the first malformed row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<RecordStore, LoadError> {
        Self::default().load_path(path)
    }

    /// Load a sales file from disk
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<RecordStore, LoadError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading sales data");
        let file = File::open(path)?;
        self.load_reader(file)
    }

    /// Load sales data from any byte source
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<RecordStore, LoadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = decode_text(bytes);
        if text.trim().is_empty() {
            return Err(LoadError::Empty);
        }

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(text.as_bytes());

        let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

        let mut records = Vec::new();
        let mut report = LoadReport::default();

        for result in csv_reader.records() {
            let row = result?;
            report.rows_read += 1;
            let line = row
                .position()
                .map(|p| p.line())
                .unwrap_or(report.rows_read as u64 + 1);

            match columns.parse(&row) {
                Ok(record) => records.push(record),
                Err(reason) => match self.malformed_rows {
                    MalformedRows::Fail => {
                        return Err(LoadError::MalformedRow { line, reason });
                    }
                    MalformedRows::Skip => {
                        warn!(line, %reason, "skipping malformed row");
                        report.skipped += 1;
                    }
                },
            }
        }

        report.loaded = records.len();
        info!(
            loaded = report.loaded,
            skipped = report.skipped,
            "sales data loaded"
        );

        RecordStore::with_report(records, report)
    }
}
