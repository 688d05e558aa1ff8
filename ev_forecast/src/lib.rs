//! # EV Forecast
//!
//! Recursive multi-step forecasting of cumulative electric-vehicle counts per
//! county, driven by a previously trained regression model.
//!
//! ## Features
//!
//! - Recursive forecaster that feeds each prediction back into its lag windows
//! - Lag, rolling-mean, percentage-change and growth-slope feature derivation
//! - Pluggable predictors: closures or a JSON-configured linear model
//! - Growth summary for a single county and side-by-side comparison of up to three
//! - Loading of the preprocessed county dataset from CSV
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ev_forecast::forecaster::{forecast, ForecastRequest};
//! use ev_forecast::predictor::from_fn;
//!
//! let request = ForecastRequest::new(
//!     "King",
//!     7,
//!     vec![10.0, 12.0, 11.0, 13.0, 14.0, 15.0],
//!     vec![10.0, 22.0, 33.0, 46.0, 60.0, 75.0],
//!     20,
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     36,
//! );
//!
//! // Any trained model works as long as it maps features to a value
//! let model = from_fn(|features| Ok(features.roll_mean_3 * 1.02));
//!
//! let result = forecast(&request, &model)?;
//! assert_eq!(result.len(), 36);
//! # Ok::<(), ev_forecast::ForecastError>(())
//! ```

pub mod comparison;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod predictor;
pub mod summary;

// Re-export commonly used types
pub use crate::comparison::{compare_regions, compare_requests, ComparisonReport, RegionOutcome};
pub use crate::config::ForecastConfig;
pub use crate::data::{EvDataset, ForecastSeed, RegionHistory};
pub use crate::error::{ForecastError, Result};
pub use crate::features::FeatureVector;
pub use crate::forecaster::{forecast, Forecast, ForecastPoint, ForecastRequest, WINDOW_SIZE};
pub use crate::predictor::{from_fn, LinearPredictor, Predictor, PredictorError};
pub use crate::summary::{forecast_region, growth_percentage, ForecastSummary, Growth, Trend};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
