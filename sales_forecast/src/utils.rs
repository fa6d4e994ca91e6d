//! Utility functions for the sales_forecast crate

use chrono::{Datelike, NaiveDate};

/// Decode raw file bytes, falling back to Latin-1 when they are not UTF-8
pub fn decode_text(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        // Every byte is a valid ISO-8859-1 code point.
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// First day of the calendar month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

pub mod date_parser {
    //! Order date parsing for the formats seen in retail exports

    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"];

    /// Parse a calendar date, dropping any time of day
    pub fn parse_date(input: &str) -> Option<NaiveDate> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return Some(date);
            }
        }

        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
                return Some(datetime.date());
            }
        }

        DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|datetime| datetime.date_naive())
    }

    /// Format a date the way exports write it
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}
