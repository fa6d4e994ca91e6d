use approx::assert_abs_diff_eq;
use rstest::rstest;
use sales_forecast::models::linear_trend::{fit_and_forecast, forecast_values, LinearTrend};
use sales_forecast::{ForecastError, ForecastModel, TrainedForecastModel};

fn linear_series(len: usize, slope: f64, intercept: f64) -> Vec<(usize, f64)> {
    (0..len)
        .map(|i| (i, slope * i as f64 + intercept))
        .collect()
}

#[test]
fn test_perfect_line_forecast() {
    let series = linear_series(10, 3.0, 7.0);
    let forecast = fit_and_forecast(&series, 3).unwrap();

    assert_eq!(forecast.len(), 3);
    let expected = [(10, 37.0), (11, 40.0), (12, 43.0)];
    for (point, (index, value)) in forecast.iter().zip(expected) {
        assert_eq!(point.time_index, index);
        assert_abs_diff_eq!(point.predicted_sales, value, epsilon = 1e-6);
    }
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(60)]
fn test_forecast_length_and_indices(#[case] horizon: usize) {
    let series = vec![(0, 120.0), (1, 80.0), (2, 150.0), (3, 95.0)];
    let forecast = fit_and_forecast(&series, horizon).unwrap();

    assert_eq!(forecast.len(), horizon);
    for (offset, point) in forecast.iter().enumerate() {
        assert_eq!(point.time_index, series.len() + offset);
    }
}

#[test]
fn test_single_point_is_insufficient() {
    let result = fit_and_forecast(&[(0, 42.0)], 5);
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientData {
            required: 2,
            actual: 1
        })
    ));

    assert!(matches!(
        fit_and_forecast(&[], 5),
        Err(ForecastError::InsufficientData { actual: 0, .. })
    ));
}

#[test]
fn test_zero_horizon_is_invalid() {
    let series = linear_series(5, 1.0, 0.0);
    assert!(matches!(
        fit_and_forecast(&series, 0),
        Err(ForecastError::InvalidHorizon(0))
    ));
}

#[test]
fn test_non_contiguous_index_rejected() {
    let series = vec![(0, 1.0), (2, 2.0), (3, 3.0)];
    assert!(matches!(
        fit_and_forecast(&series, 2),
        Err(ForecastError::InvalidSeries(_))
    ));
}

#[test]
fn test_non_finite_value_rejected() {
    let series = vec![(0, 1.0), (1, f64::INFINITY), (2, 3.0)];
    assert!(matches!(
        fit_and_forecast(&series, 2),
        Err(ForecastError::InvalidSeries(_))
    ));
}

#[test]
fn test_falling_trend_goes_negative() {
    let series = linear_series(4, -50.0, 100.0);
    let forecast = fit_and_forecast(&series, 3).unwrap();

    // 100 - 50 * 6 = -200, kept as is.
    assert_abs_diff_eq!(forecast[2].predicted_sales, -200.0, epsilon = 1e-6);
}

#[test]
fn test_index_not_calendar_time() {
    // Two series with identical values fit identically no matter how far
    // apart the underlying dates were.
    let values = [10.0, 30.0, 20.0, 40.0];
    let a = forecast_values(&values, 2).unwrap();
    let b = fit_and_forecast(
        &values.iter().copied().enumerate().collect::<Vec<_>>(),
        2,
    )
    .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_trained_model_parameters() {
    let model = LinearTrend::new();
    let trained = model.train(&[2.0, 4.0, 6.0, 8.0]).unwrap();

    assert_abs_diff_eq!(trained.slope(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(trained.intercept(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(trained.r_squared().unwrap(), 1.0, epsilon = 1e-9);
    assert_eq!(trained.history_len(), 4);
    assert_eq!(trained.name(), model.name());

    let fitted = trained.fitted();
    assert_eq!(fitted.len(), 4);
    assert_abs_diff_eq!(fitted[3], 8.0, epsilon = 1e-9);

    let next = trained.forecast(1).unwrap();
    assert_eq!(next[0].time_index, 4);
    assert_abs_diff_eq!(next[0].predicted_sales, 10.0, epsilon = 1e-9);
}

#[test]
fn test_constant_history() {
    let trained = LinearTrend::default().train(&[5.0, 5.0, 5.0]).unwrap();
    assert!(trained.r_squared().is_none());
    let forecast = trained.forecast(2).unwrap();
    assert_abs_diff_eq!(forecast[1].predicted_sales, 5.0, epsilon = 1e-12);
}
