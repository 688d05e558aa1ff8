use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate};
use ev_forecast::forecaster::{forecast, month_offset, ForecastRequest, WINDOW_SIZE};
use ev_forecast::predictor::{from_fn, PredictorError};
use ev_forecast::{FeatureVector, ForecastError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::cell::{Cell, RefCell};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("model backend offline")]
struct ModelOffline;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn king_county(horizon: usize) -> ForecastRequest {
    ForecastRequest::new(
        "King",
        7,
        vec![10.0, 12.0, 11.0, 13.0, 14.0, 15.0],
        vec![10.0, 22.0, 33.0, 46.0, 60.0, 75.0],
        20,
        date(2024, 1, 1),
        horizon,
    )
}

/// Run a forecast with a constant predictor, capturing the features of each step
fn record_features(request: &ForecastRequest, value: f64) -> Vec<FeatureVector> {
    let seen = RefCell::new(Vec::new());
    let predictor = from_fn(|features| {
        seen.borrow_mut().push(*features);
        Ok(value)
    });

    forecast(request, &predictor).unwrap();
    seen.into_inner()
}

#[test]
fn test_worked_example() {
    let request = king_county(2);
    let features = record_features(&request, 16.0);
    let result = forecast(&request, &from_fn(|_| Ok(16.0))).unwrap();

    assert_eq!(features.len(), 2);

    let first = &features[0];
    assert_eq!(first.months_since_start, 21);
    assert_eq!(first.region_encoded, 7);
    assert_eq!((first.lag1, first.lag2, first.lag3), (15.0, 14.0, 13.0));
    assert_relative_eq!(first.roll_mean_3, 14.0);
    assert_relative_eq!(first.pct_change_1, 1.0 / 14.0);
    assert_relative_eq!(first.pct_change_3, 2.0 / 13.0);
    // least-squares slope of [10, 22, 33, 46, 60, 75] against 0..5
    assert_relative_eq!(first.growth_slope, 226.0 / 17.5, epsilon = 1e-12);

    let second = &features[1];
    assert_eq!(second.months_since_start, 22);
    assert_eq!((second.lag1, second.lag2, second.lag3), (16.0, 15.0, 14.0));
    // cumulative window slid to [22, 33, 46, 60, 75, 91]
    assert_relative_eq!(second.growth_slope, 242.5 / 17.5, epsilon = 1e-12);

    assert_eq!(result.dates(), vec![date(2024, 2, 1), date(2024, 3, 1)]);
    assert_eq!(result.values(), vec![16.0, 16.0]);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(6)]
#[case(7)]
#[case(12)]
#[case(36)]
#[case(120)]
fn test_returns_exactly_horizon_points(#[case] horizon: usize) {
    let calls = Cell::new(0);
    let predictor = from_fn(|features| {
        calls.set(calls.get() + 1);
        Ok(features.lag1 + 1.0)
    });

    let result = forecast(&king_county(horizon), &predictor).unwrap();

    assert_eq!(result.len(), horizon);
    assert_eq!(calls.get(), horizon);
}

#[rstest]
#[case(date(2024, 1, 1))]
#[case(date(2024, 1, 31))]
#[case(date(2023, 11, 30))]
#[case(date(2020, 2, 29))]
fn test_dates_step_one_month_from_anchor(#[case] start: NaiveDate) {
    let mut request = king_county(36);
    request.start_date = start;

    let result = forecast(&request, &from_fn(|_| Ok(1.0))).unwrap();
    let dates = result.dates();

    let mut previous = start;
    for (i, current) in dates.iter().enumerate() {
        assert!(*current > previous);
        assert_eq!(
            current.year() * 12 + current.month0() as i32,
            previous.year() * 12 + previous.month0() as i32 + 1
        );
        assert_eq!(*current, month_offset(start, i + 1).unwrap());
        previous = *current;
    }
}

#[test]
fn test_month_end_anchor_does_not_drift() {
    let mut request = king_county(3);
    request.start_date = date(2024, 1, 31);

    let result = forecast(&request, &from_fn(|_| Ok(1.0))).unwrap();

    // chained additions would give Feb 29, Mar 29, Apr 29
    assert_eq!(
        result.dates(),
        vec![date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
    );
}

#[test]
fn test_month_counter_increments_by_one() {
    let features = record_features(&king_county(12), 3.0);
    let counters: Vec<i64> = features.iter().map(|f| f.months_since_start).collect();

    assert_eq!(counters, (21..=32).collect::<Vec<i64>>());
    assert!(features.iter().all(|f| f.region_encoded == 7));
}

#[rstest]
#[case(5.0)]
#[case(0.0)]
#[case(-5.0)]
#[case(1e9)]
fn test_zero_denominators_give_zero_change(#[case] lag1: f64) {
    let request = ForecastRequest::new(
        "Garfield",
        3,
        vec![1.0, 1.0, 1.0, 0.0, 0.0, lag1],
        vec![1.0, 2.0, 3.0, 3.0, 3.0, 3.0 + lag1],
        0,
        date(2024, 1, 1),
        1,
    );

    let features = record_features(&request, 0.0);

    assert_eq!(features[0].pct_change_1, 0.0);
    assert_eq!(features[0].pct_change_3, 0.0);
}

#[rstest]
#[case(0.0, 1.0)]
#[case(100.0, -3.5)]
#[case(-50.0, 0.25)]
#[case(1_000_000.0, 1234.5)]
#[case(42.0, 0.0)]
fn test_growth_slope_of_linear_cumulative_window(#[case] c: f64, #[case] d: f64) {
    let cumulative: Vec<f64> = (0..WINDOW_SIZE).map(|k| c + k as f64 * d).collect();
    let request = ForecastRequest::new(
        "Lincoln",
        0,
        vec![d; WINDOW_SIZE],
        cumulative,
        0,
        date(2024, 1, 1),
        1,
    );

    let features = record_features(&request, 0.0);

    assert_relative_eq!(features[0].growth_slope, d, epsilon = 1e-9, max_relative = 1e-12);
}

#[test]
fn test_history_slides_over_predictions() {
    // Predict the month counter, so each lag identifies the step that produced it
    let seen = RefCell::new(Vec::new());
    let predictor = from_fn(|features| {
        seen.borrow_mut().push(*features);
        Ok(features.months_since_start as f64)
    });

    forecast(&king_county(36), &predictor).unwrap();
    let features = seen.into_inner();

    for (i, f) in features.iter().enumerate().skip(3) {
        let step = (i + 1) as i64;
        assert_eq!(f.lag1, (20 + step - 1) as f64);
        assert_eq!(f.lag2, (20 + step - 2) as f64);
        assert_eq!(f.lag3, (20 + step - 3) as f64);
    }
}

#[test]
fn test_feedback_is_unrounded() {
    let features = record_features(&king_county(3), 15.6);

    assert_eq!(features[1].lag1, 15.6);
    assert_eq!(features[2].lag2, 15.6);
}

#[test]
fn test_cumulative_totals_continue_from_base() {
    let request = king_county(3).with_cumulative_base(500.0);
    let result = forecast(&request, &from_fn(|_| Ok(10.5))).unwrap();

    let totals: Vec<f64> = result.points().iter().map(|p| p.cumulative).collect();
    assert_eq!(totals, vec![510.5, 521.0, 531.5]);
}

#[test]
fn test_repeated_runs_are_identical() {
    let predictor = from_fn(|features| Ok(features.roll_mean_3 * 1.05 + features.growth_slope * 0.01));

    let first = forecast(&king_county(36), &predictor).unwrap();
    let second = forecast(&king_county(36), &predictor).unwrap();

    assert_eq!(first, second);
}

#[rstest]
#[case(vec![1.0; 5], vec![1.0; 6], 5)]
#[case(vec![], vec![1.0; 6], 0)]
#[case(vec![1.0; 6], vec![1.0; 7], 7)]
fn test_malformed_windows_rejected(
    #[case] history: Vec<f64>,
    #[case] cumulative: Vec<f64>,
    #[case] actual_len: usize,
) {
    let calls = Cell::new(0);
    let predictor = from_fn(|_| {
        calls.set(calls.get() + 1);
        Ok(1.0)
    });
    let request = ForecastRequest::new("Wahkiakum", 2, history, cumulative, 0, date(2024, 1, 1), 3);

    let err = forecast(&request, &predictor).unwrap_err();

    match err {
        ForecastError::InsufficientHistory {
            region,
            expected,
            actual,
        } => {
            assert_eq!(region, "Wahkiakum");
            assert_eq!(expected, 6);
            assert_eq!(actual, actual_len);
        }
        other => panic!("Expected InsufficientHistory, got {:?}", other),
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_predictor_failure_aborts_run() {
    let calls = Cell::new(0);
    let predictor = from_fn(|_| {
        calls.set(calls.get() + 1);
        if calls.get() == 3 {
            Err(PredictorError::from_error(ModelOffline))
        } else {
            Ok(1.0)
        }
    });

    let err = forecast(&king_county(10), &predictor).unwrap_err();

    assert_eq!(calls.get(), 3);
    match err {
        ForecastError::Predictor(inner) => {
            assert!(inner.inner().downcast_ref::<ModelOffline>().is_some());
            assert_eq!(inner.to_string(), "model backend offline");
        }
        other => panic!("Expected Predictor error, got {:?}", other),
    }
}

#[test]
fn test_negative_predictions_are_not_clamped() {
    let features = record_features(&king_county(2), -4.0);
    assert_eq!(features[1].lag1, -4.0);
}

#[test]
fn test_horizon_past_calendar_range_is_rejected() {
    let calls = Cell::new(0);
    let predictor = from_fn(|_| {
        calls.set(calls.get() + 1);
        Ok(1.0)
    });

    let result = forecast(&king_county(usize::MAX / 2), &predictor);

    assert!(matches!(result, Err(ForecastError::DateOutOfRange(_))));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_month_counter_overflow_is_rejected() {
    let mut request = king_county(1);
    request.start_index = i64::MAX;

    let result = forecast(&request, &from_fn(|_| Ok(1.0)));

    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_month_counter_reaches_upper_bound() {
    let mut request = king_county(2);
    request.start_index = i64::MAX - 2;

    let features = record_features(&request, 1.0);
    assert_eq!(features[1].months_since_start, i64::MAX);
}
