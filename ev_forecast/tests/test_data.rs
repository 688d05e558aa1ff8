use chrono::NaiveDate;
use ev_forecast::data::EvDataset;
use ev_forecast::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a dataset file in the preprocessed layout
fn create_sample_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(
        file,
        "Date,County,State,Electric Vehicle (EV) Total,county_encoded,months_since_start"
    )
    .unwrap();
    // Rows deliberately out of order
    for (date, total, month) in [
        ("2023-07-31", 15, 6),
        ("2023-01-31", 10, 0),
        ("2023-02-28", 12, 1),
        ("2023-03-31", 11, 2),
        ("2023-04-30", 13, 3),
        ("2023-05-31", 14, 4),
        ("2023-06-30", 15, 5),
    ] {
        writeln!(file, "{},Spokane,WA,{},31,{}", date, total, month).unwrap();
    }
    writeln!(file, "2023-01-31,Asotin,WA,2,1,0").unwrap();

    file
}

#[test]
fn test_load_from_csv() {
    let file = create_sample_file();
    let dataset = EvDataset::from_csv(file.path()).unwrap();

    assert_eq!(dataset.len(), 8);
    assert_eq!(dataset.regions(), vec!["Asotin", "Spokane"]);
}

#[test]
fn test_seed_uses_trailing_window() {
    let file = create_sample_file();
    let dataset = EvDataset::from_csv(file.path()).unwrap();
    let spokane = dataset.region("Spokane").unwrap();

    let seed = spokane.seed().unwrap();

    assert_eq!(seed.region, "Spokane");
    assert_eq!(seed.region_code, 31);
    assert_eq!(seed.history, vec![12.0, 11.0, 13.0, 14.0, 15.0, 15.0]);
    assert_eq!(seed.cumulative, vec![12.0, 23.0, 36.0, 50.0, 65.0, 80.0]);
    assert_eq!(seed.start_index, 6);
    assert_eq!(seed.start_date, NaiveDate::from_ymd_opt(2023, 7, 31).unwrap());
    assert_eq!(seed.historical_total, 90.0);
}

#[test]
fn test_seed_request_continues_full_history_total() {
    let file = create_sample_file();
    let dataset = EvDataset::from_csv(file.path()).unwrap();

    let request = dataset.region("Spokane").unwrap().seed().unwrap().request(12);

    assert_eq!(request.horizon, 12);
    assert_eq!(request.cumulative_base, Some(90.0));
    assert_eq!(request.initial_cumulative.last(), Some(&80.0));
}

#[test]
fn test_cumulative_series_runs_over_full_history() {
    let file = create_sample_file();
    let dataset = EvDataset::from_csv(file.path()).unwrap();
    let spokane = dataset.region("Spokane").unwrap();

    let totals: Vec<f64> = spokane.cumulative_series().into_iter().map(|(_, t)| t).collect();

    assert_eq!(totals, vec![10.0, 22.0, 33.0, 46.0, 60.0, 75.0, 90.0]);
    assert_eq!(spokane.historical_total(), 90.0);
}

#[test]
fn test_short_region_cannot_seed() {
    let file = create_sample_file();
    let dataset = EvDataset::from_csv(file.path()).unwrap();

    let err = dataset.region("Asotin").unwrap().seed().unwrap_err();

    assert!(matches!(
        err,
        ForecastError::InsufficientHistory { ref region, actual: 1, .. } if region == "Asotin"
    ));
}

#[test]
fn test_missing_file() {
    let result = EvDataset::from_csv("/nonexistent/ev_data.csv");
    assert!(matches!(result, Err(ForecastError::CsvError(_))));
}

#[test]
fn test_malformed_row() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Date,County,county_encoded,months_since_start,Electric Vehicle (EV) Total"
    )
    .unwrap();
    writeln!(file, "not-a-date,Ferry,4,0,1").unwrap();

    assert!(matches!(
        EvDataset::from_csv(file.path()),
        Err(ForecastError::CsvError(_))
    ));
}
