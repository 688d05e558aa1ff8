//! # EV Adoption
//!
//! `ev_adoption_workspace` bundles the recursive EV forecaster with the
//! numeric kernels it is built on.
//!
//! ## Example
//!
//! ```
//! use ev_adoption_workspace::{forecast, from_fn, ForecastRequest};
//! use chrono::NaiveDate;
//!
//! let request = ForecastRequest::new(
//!     "Whatcom",
//!     36,
//!     vec![4.0, 5.0, 5.0, 6.0, 7.0, 7.0],
//!     vec![4.0, 9.0, 14.0, 20.0, 27.0, 34.0],
//!     48,
//!     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
//!     3,
//! );
//!
//! let result = forecast(&request, &from_fn(|f| Ok(f.lag1))).unwrap();
//! assert_eq!(result.values(), vec![7.0, 7.0, 7.0]);
//! ```

pub use ev_forecast;
pub use ev_math;

pub use ev_forecast::{
    compare_regions, forecast, forecast_region, from_fn, EvDataset, Forecast, ForecastConfig,
    ForecastError, ForecastPoint, ForecastRequest, Growth, LinearPredictor, Predictor,
};
