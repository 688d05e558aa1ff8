//! Growth summary for a single region forecast

use crate::config::ForecastConfig;
use crate::data::RegionHistory;
use crate::error::Result;
use crate::forecaster::{forecast, Forecast};
use crate::predictor::Predictor;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Direction of forecast growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increase,
    Decrease,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increase => write!(f, "increase"),
            Trend::Decrease => write!(f, "decrease"),
        }
    }
}

/// Percentage growth of the cumulative total over the forecast horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Growth {
    Percent(f64),
    /// The historical total was not positive, so no percentage exists
    Undefined,
}

impl Growth {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Growth::Percent(p) => Some(*p),
            Growth::Undefined => None,
        }
    }

    /// `Increase` only for strictly positive growth
    pub fn trend(&self) -> Option<Trend> {
        self.percent().map(|p| {
            if p > 0.0 {
                Trend::Increase
            } else {
                Trend::Decrease
            }
        })
    }
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Growth::Percent(p) => write!(f, "{:.2}%", p),
            Growth::Undefined => write!(f, "undefined"),
        }
    }
}

/// Growth from the last historical cumulative total to the last forecast one
pub fn growth_percentage(historical_final: f64, forecast_final: f64) -> Growth {
    if historical_final > 0.0 {
        Growth::Percent((forecast_final - historical_final) / historical_final * 100.0)
    } else {
        Growth::Undefined
    }
}

/// Where a point of the combined cumulative series comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    Historical,
    Forecast,
}

/// One point of the historical-plus-forecast cumulative series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub cumulative: f64,
    pub source: Source,
}

/// Forecast of the primary region together with its growth figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    region: String,
    historical: Vec<(NaiveDate, f64)>,
    historical_total: f64,
    forecast: Forecast,
    forecast_total: f64,
    growth: Growth,
}

impl ForecastSummary {
    /// Assemble a summary from a region's cumulative history and its forecast
    pub fn new(historical: Vec<(NaiveDate, f64)>, forecast: Forecast) -> Self {
        let historical_total = historical.last().map(|(_, total)| *total).unwrap_or(0.0);
        let forecast_total = forecast.final_cumulative().unwrap_or(historical_total);

        Self {
            region: forecast.region().to_string(),
            historical,
            historical_total,
            growth: growth_percentage(historical_total, forecast_total),
            forecast,
            forecast_total,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn historical_total(&self) -> f64 {
        self.historical_total
    }

    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }

    pub fn forecast_total(&self) -> f64 {
        self.forecast_total
    }

    pub fn growth(&self) -> Growth {
        self.growth
    }

    /// Historical cumulative totals followed by the forecast ones
    pub fn combined_series(&self) -> Vec<SeriesPoint> {
        let historical = self.historical.iter().map(|&(date, cumulative)| SeriesPoint {
            date,
            cumulative,
            source: Source::Historical,
        });
        let forecast = self.forecast.points().iter().map(|p| SeriesPoint {
            date: p.date,
            cumulative: p.cumulative,
            source: Source::Forecast,
        });

        historical.chain(forecast).collect()
    }

    /// One-line growth statement for the region
    pub fn message(&self) -> String {
        match (self.growth.percent(), self.growth.trend()) {
            (Some(percent), Some(trend)) => format!(
                "Forecasted EV growth in {}: {} of {:.2}% over {}.",
                self.region,
                trend,
                percent,
                describe_period(self.forecast.len())
            ),
            _ => "Historical total is zero. Growth % cannot be calculated.".to_string(),
        }
    }
}

/// Human description of a horizon given in months
fn describe_period(months: usize) -> String {
    match (months / 12, months % 12) {
        (1, 0) => "1 year".to_string(),
        (years, 0) => format!("{} years", years),
        (_, _) if months == 1 => "1 month".to_string(),
        _ => format!("{} months", months),
    }
}

/// Forecast a region from its history and summarize its growth
pub fn forecast_region<P>(
    history: &RegionHistory,
    config: &ForecastConfig,
    predictor: &P,
) -> Result<ForecastSummary>
where
    P: Predictor + ?Sized,
{
    let request = history.seed()?.request(config.horizon);
    let forecast = forecast(&request, predictor)?;
    Ok(ForecastSummary::new(history.cumulative_series(), forecast))
}
