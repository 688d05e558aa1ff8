//! # EV Math
//!
//! Numeric kernels behind the recursive EV forecaster.
//! This crate provides the fixed-capacity sliding window, the least-squares
//! trend fit and the zero-guarded relative change used to derive the lag
//! features of each forecast step.

use thiserror::Error;

pub mod change;
pub mod regression;
pub mod window;

pub use change::{pct_change, rolling_mean};
pub use regression::{least_squares_slope, LinearFit};
pub use window::RollingWindow;

/// Errors that can occur in the numeric kernels
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for EV math operations
pub type Result<T> = std::result::Result<T, MathError>;
