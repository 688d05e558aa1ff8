//! Relative change and short rolling averages

use crate::{MathError, Result};

/// Relative change from `previous` to `current`.
///
/// A zero `previous` yields `0.0` instead of an infinite or NaN ratio.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous != 0.0 {
        (current - previous) / previous
    } else {
        0.0
    }
}

/// Arithmetic mean of a short run of values
pub fn rolling_mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot average an empty window".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
