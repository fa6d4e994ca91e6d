use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_forecast::data::{filter, DataLoader, DateRange, MalformedRows, RecordStore, SalesRecord};
use sales_forecast::LoadError;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_records() -> Vec<SalesRecord> {
    vec![
        SalesRecord::new(date(2017, 3, 2), "Furniture", "Sauder Bookcase", 120.0, 12.5),
        SalesRecord::new(date(2017, 1, 15), "Technology", "Canon Copier", 900.0, -40.0),
        SalesRecord::new(date(2017, 2, 1), "Office Supplies", "Avery Binder", 15.5, 4.0),
        SalesRecord::new(date(2017, 1, 15), "Furniture", "Hon Task Chair", 300.0, 30.0),
        SalesRecord::new(date(2017, 4, 30), "Technology", "Logitech Wireless Mouse", 45.0, 9.0),
    ]
}

const SUPERSTORE_CSV: &str = "\
Row ID,Order ID,Order Date,Ship Date,Category,Product Name,Sales,Quantity,Profit
1,CA-2016-152156,11/8/2016,11/11/2016,Furniture,Bush Somerset Collection Bookcase,261.96,2,41.9136
2,CA-2016-152156,11/8/2016,11/11/2016,Furniture,Hon Deluxe Fabric Upholstered Stacking Chairs,731.94,3,219.582
3,CA-2016-138688,6/12/2016,6/16/2016,Office Supplies,Self-Adhesive Address Labels,14.62,2,6.8714
4,US-2015-108966,10/11/2015,10/18/2015,Furniture,Bretford CR4500 Series Slim Rectangular Table,957.5775,5,-383.031
";

#[test]
fn test_load_superstore_layout() {
    let store = DataLoader::new()
        .load_reader(SUPERSTORE_CSV.as_bytes())
        .unwrap();

    assert_eq!(store.len(), 4);
    let first = &store.records()[0];
    assert_eq!(first.order_date, date(2016, 11, 8));
    assert_eq!(first.category, "Furniture");
    assert_eq!(first.product_name, "Bush Somerset Collection Bookcase");
    assert!((first.sales - 261.96).abs() < 1e-9);
    assert!((store.records()[3].profit - (-383.031)).abs() < 1e-9);

    assert_eq!(
        store.span(),
        Some(DateRange::new(date(2015, 10, 11), date(2016, 11, 8)))
    );
    assert_eq!(store.report().skipped, 0);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", SUPERSTORE_CSV).unwrap();

    let store = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(store.len(), 4);
}

#[test]
fn test_load_latin1_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Order Date,Category,Product Name,Sales,Profit\n")
        .unwrap();
    // "Caf\xe9 Table" in ISO-8859-1
    file.write_all(b"2016-05-01,Furniture,Caf\xe9 Table,99.5,10\n")
        .unwrap();

    let store = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(store.records()[0].product_name, "Café Table");
}

#[test]
fn test_missing_file_is_io_error() {
    let result = DataLoader::from_csv("/nonexistent/Superstore.csv");
    assert!(matches!(result, Err(LoadError::Io(_))));
}

#[test]
fn test_missing_column() {
    let csv = "Order Date,Category,Sales,Profit\n2016-01-01,Furniture,10,1\n";
    match DataLoader::new().load_reader(csv.as_bytes()) {
        Err(LoadError::MissingColumn(name)) => assert_eq!(name, "Product Name"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_header_only_is_empty() {
    let csv = "Order Date,Category,Product Name,Sales,Profit\n";
    assert!(matches!(
        DataLoader::new().load_reader(csv.as_bytes()),
        Err(LoadError::Empty)
    ));
    assert!(matches!(RecordStore::new(Vec::new()), Err(LoadError::Empty)));
}

#[rstest]
#[case("not-a-date,Furniture,Chair,10,1")]
#[case("2016-01-01,Furniture,Chair,ten,1")]
#[case("2016-01-01,Furniture,Chair,10,")]
#[case("2016-01-01,Furniture,Chair,-10,1")]
#[case("2016-01-01,,Chair,10,1")]
#[case("2016-01-01,Furniture")]
fn test_malformed_row_fails_load(#[case] bad_row: &str) {
    let csv = format!(
        "Order Date,Category,Product Name,Sales,Profit\n2016-01-01,Furniture,Desk,50,5\n{}\n",
        bad_row
    );
    match DataLoader::new().load_reader(csv.as_bytes()) {
        Err(LoadError::MalformedRow { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected MalformedRow, got {:?}", other),
    }
}

#[test]
fn test_malformed_rows_skipped_and_counted() {
    let csv = "\
Order Date,Category,Product Name,Sales,Profit
2016-01-01,Furniture,Desk,50,5
garbage,Furniture,Desk,50,5
2016-01-03,Technology,Phone,n/a,5
2016-01-04,Technology,Phone,80,-3
";
    let store = DataLoader::new()
        .with_malformed_rows(MalformedRows::Skip)
        .load_reader(csv.as_bytes())
        .unwrap();

    assert_eq!(store.len(), 2);
    let report = store.report();
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 2);
}

#[test]
fn test_all_rows_skipped_is_empty() {
    let csv = "Order Date,Category,Product Name,Sales,Profit\nbad,Furniture,Desk,50,5\n";
    let result = DataLoader::new()
        .with_malformed_rows(MalformedRows::Skip)
        .load_reader(csv.as_bytes());
    assert!(matches!(result, Err(LoadError::Empty)));
}

#[test]
fn test_full_span_filter_is_identity() {
    let records = sample_records();
    let range = DateRange::new(date(2000, 1, 1), date(2100, 1, 1));
    assert_eq!(filter(&records, &range), records);
}

#[test]
fn test_inverted_range_is_empty() {
    let records = sample_records();
    let range = DateRange::new(date(2017, 4, 30), date(2017, 1, 1));
    assert!(range.is_empty());
    assert!(filter(&records, &range).is_empty());

    let store = RecordStore::new(records).unwrap();
    assert!(store.query(&range).is_empty());
}

#[rstest]
#[case(date(2017, 1, 15), date(2017, 1, 15), 2)]
#[case(date(2017, 1, 16), date(2017, 2, 28), 1)]
#[case(date(2017, 1, 1), date(2017, 3, 2), 4)]
#[case(date(2018, 1, 1), date(2018, 12, 31), 0)]
#[case(date(2010, 1, 1), date(2017, 1, 14), 0)]
fn test_filter_bounds_inclusive(
    #[case] start: NaiveDate,
    #[case] end: NaiveDate,
    #[case] expected: usize,
) {
    let records = sample_records();
    let range = DateRange::new(start, end);
    let filtered = filter(&records, &range);

    assert_eq!(filtered.len(), expected);
    assert!(filtered.iter().all(|r| start <= r.order_date && r.order_date <= end));
}

#[test]
fn test_filter_empty_input() {
    let range = DateRange::single_day(date(2017, 1, 15));
    assert!(filter(&[], &range).is_empty());
}

#[test]
fn test_store_query_matches_filter() {
    let records = sample_records();
    let store = RecordStore::new(records.clone()).unwrap();

    let ranges = [
        DateRange::new(date(2017, 1, 1), date(2017, 12, 31)),
        DateRange::single_day(date(2017, 1, 15)),
        DateRange::new(date(2017, 2, 1), date(2017, 3, 2)),
        DateRange::new(date(2019, 1, 1), date(2019, 1, 2)),
    ];

    for range in &ranges {
        assert_eq!(store.query(range), filter(&records, range), "range {}", range);
    }
}

#[test]
fn test_store_query_preserves_load_order() {
    let store = RecordStore::new(sample_records()).unwrap();
    let hits = store.query(&DateRange::new(date(2017, 1, 1), date(2017, 3, 31)));
    let products: Vec<&str> = hits.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(
        products,
        vec!["Sauder Bookcase", "Canon Copier", "Avery Binder", "Hon Task Chair"]
    );
}

#[rstest]
#[case(SalesRecord::new(date(2017, 1, 1), "Furniture", "Chair", -10.0, 1.0), "negative sales")]
#[case(SalesRecord::new(date(2017, 1, 1), "Furniture", "Chair", f64::NAN, 1.0), "invalid sales")]
#[case(SalesRecord::new(date(2017, 1, 1), "Furniture", "Chair", 10.0, f64::INFINITY), "invalid profit")]
#[case(SalesRecord::new(date(2017, 1, 1), "", "Chair", 10.0, 1.0), "empty category")]
#[case(SalesRecord::new(date(2017, 1, 1), "Furniture", "  ", 10.0, 1.0), "empty product name")]
fn test_store_rejects_invalid_records(#[case] bad: SalesRecord, #[case] expected: &str) {
    let mut records = sample_records();
    records.push(bad);

    match RecordStore::new(records) {
        Err(LoadError::InvalidRecord { index, reason }) => {
            assert_eq!(index, 5);
            assert!(reason.contains(expected), "reason was {:?}", reason);
        }
        other => panic!("expected InvalidRecord, got {:?}", other),
    }
}

#[test]
fn test_zero_byte_source_is_empty() {
    assert!(matches!(
        DataLoader::new().load_reader(&b""[..]),
        Err(LoadError::Empty)
    ));
    assert!(matches!(
        DataLoader::new().load_reader(&b"\xef\xbb\xbf\n"[..]),
        Err(LoadError::Empty)
    ));
}

#[test]
fn test_names_kept_as_written() {
    let csv = "\
 Order Date , Category ,Product Name,Sales,Profit
 2016-01-01 , Furniture ,Chair  , 50.5 , 5
";
    let store = DataLoader::new().load_reader(csv.as_bytes()).unwrap();
    let record = &store.records()[0];

    assert_eq!(record.order_date, date(2016, 1, 1));
    assert_eq!(record.category, " Furniture ");
    assert_eq!(record.product_name, "Chair  ");
    assert!((record.sales - 50.5).abs() < 1e-9);
}
