use chrono::NaiveDate;
use ev_forecast::data::{EvDataset, EvRecord};
use ev_forecast::{compare_regions, ForecastConfig, LinearPredictor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("EV Forecast: County Comparison Example");
    println!("======================================\n");

    let dataset = create_sample_dataset()?;
    println!("Counties available: {:?}\n", dataset.regions());

    let model = LinearPredictor::from_json_str(
        r#"{
            "intercept": 1.0,
            "coefficients": {
                "ev_total_lag1": 0.6,
                "ev_total_roll_mean_3": 0.4,
                "ev_growth_slope": 0.02
            }
        }"#,
    )?;

    // "Island" only has four months of data and is reported as a failure
    let selection = ["Island", "Kitsap", "Spokane"];
    let report = compare_regions(&dataset, &selection, &ForecastConfig::default(), &model)?;

    for outcome in report.outcomes() {
        println!("{}", outcome.describe());
    }

    println!(
        "\n{} of {} counties forecast successfully",
        report.successes().count(),
        report.outcomes().len()
    );

    Ok(())
}

fn create_sample_dataset() -> Result<EvDataset, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 31).ok_or("invalid start date")?;
    let counties = [("Island", 12, 4, 8.0), ("Kitsap", 17, 24, 40.0), ("Spokane", 31, 24, 65.0)];
    let mut records = Vec::new();

    for (county, code, months, base) in counties {
        for month in 0..months {
            let date = start
                .checked_add_months(chrono::Months::new(month))
                .ok_or("date out of range")?;
            records.push(EvRecord {
                date,
                county: Some(county.to_string()),
                county_encoded: code,
                months_since_start: month as i64,
                ev_total: base + month as f64 * 2.0,
            });
        }
    }

    Ok(EvDataset::from_records(records))
}
