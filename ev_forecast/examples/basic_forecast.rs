use chrono::{Datelike, NaiveDate};
use ev_forecast::data::{Observation, RegionHistory};
use ev_forecast::predictor::from_fn;
use ev_forecast::{forecast_region, ForecastConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("EV Forecast: Basic Forecasting Example");
    println!("======================================\n");

    let history = create_sample_history()?;
    println!(
        "Sample history created: {} months for {}, {:.0} EVs registered\n",
        history.len(),
        history.name(),
        history.historical_total()
    );

    // Stand-in for a trained model: damped momentum on the recent months
    let model = from_fn(|features| {
        let momentum = features.pct_change_1.clamp(-0.1, 0.1);
        Ok(features.roll_mean_3 * (1.0 + momentum * 0.5))
    });

    let config = ForecastConfig::default().with_horizon(24);
    let summary = forecast_region(&history, &config, &model)?;

    println!("Forecast (every 6th month):");
    for (i, point) in summary.forecast().points().iter().enumerate() {
        if i % 6 == 5 {
            println!(
                "  {}: {:>6.0} new, {:>8.0} cumulative",
                point.date,
                point.rounded(),
                point.cumulative
            );
        }
    }

    println!("\n{}", summary.message());

    Ok(())
}

/// Create three years of monthly registrations with a steady upward trend
fn create_sample_history() -> Result<RegionHistory, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 31).ok_or("invalid start date")?;
    let mut observations = Vec::with_capacity(36);

    for month in 0..36_u32 {
        let date = start
            .checked_add_months(chrono::Months::new(month))
            .ok_or("date out of range")?;

        // Growth plus a mild seasonal bump in spring
        let seasonal = if (3..=5).contains(&date.month()) { 4.0 } else { 0.0 };
        let ev_total = 20.0 + month as f64 * 1.5 + seasonal;

        observations.push(Observation {
            date,
            months_since_start: month as i64,
            ev_total,
        });
    }

    Ok(RegionHistory::new("Thurston", 33, observations)?)
}
