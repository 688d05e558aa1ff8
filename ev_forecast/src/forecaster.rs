//! Recursive multi-step forecaster
//!
//! Each step derives a [`FeatureVector`] from a six-value history window and a
//! six-value cumulative window, asks the predictor for the next value, and
//! pushes that prediction back into both windows. Later steps therefore see
//! the model's own earlier output as their lags.

use crate::error::{ForecastError, Result};
use crate::features::FeatureVector;
use crate::predictor::Predictor;
use chrono::{Months, NaiveDate};
use ev_math::RollingWindow;
use serde::Serialize;
use tracing::{debug, info};

/// Number of trailing observations that seed the history and cumulative windows
pub const WINDOW_SIZE: usize = 6;

/// Everything needed to forecast one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    /// Region name, used for logging and error reports
    pub region: String,
    /// Encoded region identifier passed to the model
    pub region_code: i64,
    /// Trailing raw observations, oldest first
    pub initial_history: Vec<f64>,
    /// Running totals over the same observations, oldest first
    pub initial_cumulative: Vec<f64>,
    /// Latest known month counter
    pub start_index: i64,
    /// Latest known observation date
    pub start_date: NaiveDate,
    /// Number of months to forecast
    pub horizon: usize,
    /// Starting value for the emitted cumulative totals.
    /// Falls back to the last value of `initial_cumulative`.
    pub cumulative_base: Option<f64>,
}

impl ForecastRequest {
    pub fn new(
        region: impl Into<String>,
        region_code: i64,
        initial_history: Vec<f64>,
        initial_cumulative: Vec<f64>,
        start_index: i64,
        start_date: NaiveDate,
        horizon: usize,
    ) -> Self {
        Self {
            region: region.into(),
            region_code,
            initial_history,
            initial_cumulative,
            start_index,
            start_date,
            horizon,
            cumulative_base: None,
        }
    }

    /// Start the emitted cumulative totals from a known historical total
    pub fn with_cumulative_base(mut self, base: f64) -> Self {
        self.cumulative_base = Some(base);
        self
    }

    fn validate(&self) -> Result<()> {
        for window in [&self.initial_history, &self.initial_cumulative] {
            if window.len() != WINDOW_SIZE {
                return Err(ForecastError::InsufficientHistory {
                    region: self.region.clone(),
                    expected: WINDOW_SIZE,
                    actual: window.len(),
                });
            }
        }

        if self.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be at least 1".to_string(),
            ));
        }

        // the last step bounds every intermediate date and counter
        month_offset(self.start_date, self.horizon)?;
        i64::try_from(self.horizon)
            .ok()
            .and_then(|h| self.start_index.checked_add(h))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Month counter {} overflows over a horizon of {}",
                    self.start_index, self.horizon
                ))
            })?;

        Ok(())
    }
}

/// One forecast month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Unrounded model output for the month
    pub predicted: f64,
    /// Running total including this month's prediction
    pub cumulative: f64,
}

impl ForecastPoint {
    /// Prediction rounded for display
    pub fn rounded(&self) -> f64 {
        self.predicted.round()
    }
}

/// Forecast for a single region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    region: String,
    region_code: i64,
    points: Vec<ForecastPoint>,
}

impl Forecast {
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn region_code(&self) -> i64 {
        self.region_code
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of forecast months
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    /// Cumulative total at the end of the horizon
    pub fn final_cumulative(&self) -> Option<f64> {
        self.points.last().map(|p| p.cumulative)
    }
}

/// Sliding state of one forecast run
#[derive(Debug, Clone)]
struct ForecastState {
    history: RollingWindow,
    cumulative: RollingWindow,
}

impl ForecastState {
    fn seed(request: &ForecastRequest) -> Result<Self> {
        Ok(Self {
            history: RollingWindow::filled(WINDOW_SIZE, &request.initial_history)?,
            cumulative: RollingWindow::filled(WINDOW_SIZE, &request.initial_cumulative)?,
        })
    }

    fn features(&self, months_since_start: i64, region_code: i64) -> Result<FeatureVector> {
        FeatureVector::derive(
            months_since_start,
            region_code,
            &self.history,
            &self.cumulative,
        )
    }

    /// Feed a prediction back into both windows
    fn advance(&mut self, predicted: f64) -> Result<()> {
        let next_total = self.cumulative.lag(1)? + predicted;
        self.history.push(predicted);
        self.cumulative.push(next_total);
        Ok(())
    }
}

/// Date `months` months after `anchor`, clamped to the end of shorter months
pub fn month_offset(anchor: NaiveDate, months: usize) -> Result<NaiveDate> {
    u32::try_from(months)
        .ok()
        .and_then(|m| anchor.checked_add_months(Months::new(m)))
        .ok_or_else(|| {
            ForecastError::DateOutOfRange(format!("{} plus {} months", anchor, months))
        })
}

/// Run the recursive forecast for one region.
///
/// Returns exactly `request.horizon` points, or an error with no partial
/// output. A predictor failure aborts the run and is returned unchanged
/// inside [`ForecastError::Predictor`].
pub fn forecast<P>(request: &ForecastRequest, predictor: &P) -> Result<Forecast>
where
    P: Predictor + ?Sized,
{
    request.validate()?;

    let mut state = ForecastState::seed(request)?;
    let mut running_total = match request.cumulative_base {
        Some(base) => base,
        None => state.cumulative.lag(1)?,
    };
    let mut points = Vec::with_capacity(request.horizon);

    for step in 1..=request.horizon {
        let date = month_offset(request.start_date, step)?;
        let months_since_start = request.start_index + step as i64;

        let features = state.features(months_since_start, request.region_code)?;
        let predicted = predictor.predict(&features)?;
        running_total += predicted;

        debug!(
            region = %request.region,
            step,
            %date,
            lag1 = features.lag1,
            growth_slope = features.growth_slope,
            predicted,
            "forecast step"
        );

        points.push(ForecastPoint {
            date,
            predicted,
            cumulative: running_total,
        });
        state.advance(predicted)?;
    }

    info!(
        region = %request.region,
        horizon = request.horizon,
        final_cumulative = running_total,
        "forecast complete"
    );

    Ok(Forecast {
        region: request.region.clone(),
        region_code: request.region_code,
        points,
    })
}
