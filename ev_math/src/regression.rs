//! Least-squares trend fitting
//!
//! Fits `y = slope * x + intercept` where `x` is the position of each value
//! in the series (0, 1, 2, ...). This is the degree-1 polynomial fit used for
//! the cumulative growth slope.

use crate::{MathError, Result};
use serde::Serialize;

/// Coefficients of a degree-1 least-squares fit against the value index
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through `values`, using each value's index as x
    pub fn fit<'a, I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a f64>,
        I::IntoIter: Clone,
    {
        let values = values.into_iter();
        let n = values.clone().count();
        if n < 2 {
            return Err(MathError::InsufficientData(
                "Not enough data for a linear fit. Need at least 2 points.".to_string(),
            ));
        }

        let n_f = n as f64;
        let x_mean = (n_f - 1.0) / 2.0;
        let y_mean = values.clone().sum::<f64>() / n_f;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.enumerate() {
            let x = i as f64;
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        let slope = numerator / denominator;

        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Evaluate the fitted line at `x`
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Slope of the least-squares line through `values` against their index
pub fn least_squares_slope<'a, I>(values: I) -> Result<f64>
where
    I: IntoIterator<Item = &'a f64>,
    I::IntoIter: Clone,
{
    LinearFit::fit(values).map(|fit| fit.slope)
}
