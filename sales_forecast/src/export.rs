//! Delimited text export of records, aggregates and series

use crate::data::SalesRecord;
use crate::error::Result;
use crate::utils::date_parser::format_date;
use chrono::NaiveDate;
use csv::WriterBuilder;
use std::io::Write;

/// Write records with the store's column layout
///
/// The output loads back through [`crate::data::DataLoader`] unchanged.
pub fn write_records<W: Write>(writer: W, records: &[SalesRecord]) -> Result<()> {
    let mut wrt = WriterBuilder::new().has_headers(false).from_writer(writer);

    // Written by hand so an empty export still carries the header row.
    wrt.write_record([
        crate::data::ORDER_DATE,
        crate::data::CATEGORY,
        crate::data::PRODUCT_NAME,
        crate::data::SALES,
        crate::data::PROFIT,
    ])?;

    for record in records {
        wrt.serialize(record)?;
    }
    wrt.flush()?;
    Ok(())
}

/// Records as a CSV string
pub fn records_to_csv(records: &[SalesRecord]) -> Result<String> {
    let mut out = Vec::new();
    write_records(&mut out, records)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Write a two-column key/value table
pub fn write_aggregate<W, K>(
    writer: W,
    key_header: &str,
    value_header: &str,
    rows: &[(K, f64)],
) -> Result<()>
where
    W: Write,
    K: AsRef<str>,
{
    let mut wrt = WriterBuilder::new().from_writer(writer);
    wrt.write_record([key_header, value_header])?;
    for (key, value) in rows {
        wrt.write_record([key.as_ref(), value.to_string().as_str()])?;
    }
    wrt.flush()?;
    Ok(())
}

/// Write a `(period, value)` series with ISO dates
pub fn write_series<W: Write>(writer: W, value_header: &str, series: &[(NaiveDate, f64)]) -> Result<()> {
    let mut wrt = WriterBuilder::new().from_writer(writer);
    wrt.write_record(["Period", value_header])?;
    for (period, value) in series {
        wrt.write_record([format_date(*period), value.to_string()])?;
    }
    wrt.flush()?;
    Ok(())
}
