use sales_forecast::{ForecastError, LoadError};
use sales_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let load_error = LoadError::from(io_error);
    assert!(matches!(load_error, LoadError::Io(_)));

    let forecast_error = ForecastError::from(load_error);
    assert!(matches!(forecast_error, ForecastError::Load(LoadError::Io(_))));

    let math_error = MathError::InsufficientData("need 2 points".to_string());
    assert!(matches!(
        ForecastError::from(math_error),
        ForecastError::Math(MathError::InsufficientData(_))
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InsufficientData {
        required: 2,
        actual: 1,
    };
    assert_eq!(
        error.to_string(),
        "Insufficient data: need at least 2 points, got 1"
    );

    let error = ForecastError::InvalidCapacity(0.0);
    assert!(error.to_string().contains("must be greater than zero"));

    let error = ForecastError::from(LoadError::MalformedRow {
        line: 7,
        reason: "invalid order date 'x'".to_string(),
    });
    let text = error.to_string();
    assert!(text.contains("line 7"));
    assert!(text.contains("invalid order date"));

    let error = ForecastError::from(LoadError::MissingColumn("Sales".to_string()));
    assert!(error.to_string().contains("'Sales'"));

    let error = LoadError::InvalidRecord {
        index: 3,
        reason: "negative sales amount -10".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid record at index 3: negative sales amount -10"
    );
}
