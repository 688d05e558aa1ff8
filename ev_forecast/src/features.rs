//! Feature vector handed to the predictor on every forecast step

use crate::error::Result;
use ev_math::{least_squares_slope, pct_change, rolling_mean, RollingWindow};
use serde::Serialize;

/// Inputs for one prediction.
///
/// Serialized names and [`FeatureVector::COLUMNS`] follow the column names of
/// the trained EV model, in the order the model was fitted with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Month counter, one past the previous step
    pub months_since_start: i64,
    /// Encoded region identifier, constant across a run
    #[serde(rename = "county_encoded")]
    pub region_encoded: i64,
    #[serde(rename = "ev_total_lag1")]
    pub lag1: f64,
    #[serde(rename = "ev_total_lag2")]
    pub lag2: f64,
    #[serde(rename = "ev_total_lag3")]
    pub lag3: f64,
    #[serde(rename = "ev_total_roll_mean_3")]
    pub roll_mean_3: f64,
    #[serde(rename = "ev_total_pct_change_1")]
    pub pct_change_1: f64,
    #[serde(rename = "ev_total_pct_change_3")]
    pub pct_change_3: f64,
    /// Least-squares slope of the cumulative window against its index
    #[serde(rename = "ev_growth_slope")]
    pub growth_slope: f64,
}

impl FeatureVector {
    /// Model column names, in the same order as [`FeatureVector::values`]
    pub const COLUMNS: [&'static str; 9] = [
        "months_since_start",
        "county_encoded",
        "ev_total_lag1",
        "ev_total_lag2",
        "ev_total_lag3",
        "ev_total_roll_mean_3",
        "ev_total_pct_change_1",
        "ev_total_pct_change_3",
        "ev_growth_slope",
    ];

    /// Derive the step features from the current history and cumulative windows
    pub fn derive(
        months_since_start: i64,
        region_encoded: i64,
        history: &RollingWindow,
        cumulative: &RollingWindow,
    ) -> Result<Self> {
        let lag1 = history.lag(1)?;
        let lag2 = history.lag(2)?;
        let lag3 = history.lag(3)?;

        Ok(Self {
            months_since_start,
            region_encoded,
            lag1,
            lag2,
            lag3,
            roll_mean_3: rolling_mean(&[lag1, lag2, lag3])?,
            pct_change_1: pct_change(lag1, lag2),
            pct_change_3: pct_change(lag1, lag3),
            growth_slope: least_squares_slope(cumulative.iter())?,
        })
    }

    /// Feature values as model input, ordered like [`FeatureVector::COLUMNS`]
    pub fn values(&self) -> [f64; 9] {
        [
            self.months_since_start as f64,
            self.region_encoded as f64,
            self.lag1,
            self.lag2,
            self.lag3,
            self.roll_mean_3,
            self.pct_change_1,
            self.pct_change_3,
            self.growth_slope,
        ]
    }

    /// Look up a feature value by model column name
    pub fn get(&self, column: &str) -> Option<f64> {
        Self::COLUMNS
            .iter()
            .position(|name| *name == column)
            .map(|idx| self.values()[idx])
    }
}
