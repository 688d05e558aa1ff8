//! Predictor capability consumed by the forecaster
//!
//! The forecaster never builds or inspects a model; it is handed something
//! that implements [`Predictor`] and calls it once per step. Closures can be
//! adapted with [`from_fn`], and [`LinearPredictor`] evaluates a linear model
//! whose coefficients are stored as JSON.

use crate::error::{ForecastError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

/// Opaque failure raised by a predictor.
///
/// The wrapped error is kept as-is so callers can downcast it through
/// [`PredictorError::inner`].
#[derive(Debug)]
pub struct PredictorError(Box<dyn Error + Send + Sync>);

impl PredictorError {
    /// Create a predictor error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// Wrap an arbitrary error raised by a model backend
    pub fn from_error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }

    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn Error + Send + Sync> {
        self.0
    }
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for PredictorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn Error + Send + Sync>> for PredictorError {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        Self(err)
    }
}

/// A trained model that maps one feature vector to one predicted value
pub trait Predictor {
    /// Predict the next raw EV count from the step features
    fn predict(&self, features: &FeatureVector) -> std::result::Result<f64, PredictorError>;
}

/// Predictor backed by a closure, see [`from_fn`]
#[derive(Clone, Copy)]
pub struct FnPredictor<F> {
    f: F,
}

impl<F> fmt::Debug for FnPredictor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredictor").finish_non_exhaustive()
    }
}

/// Adapt a closure into a [`Predictor`]
///
/// ```
/// use ev_forecast::predictor::{from_fn, Predictor};
///
/// let constant = from_fn(|_| Ok(16.0));
/// # let _ = &constant as &dyn Predictor;
/// ```
pub fn from_fn<F>(f: F) -> FnPredictor<F>
where
    F: Fn(&FeatureVector) -> std::result::Result<f64, PredictorError>,
{
    FnPredictor { f }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&FeatureVector) -> std::result::Result<f64, PredictorError>,
{
    fn predict(&self, features: &FeatureVector) -> std::result::Result<f64, PredictorError> {
        (self.f)(features)
    }
}

/// Linear model over the named features: `intercept + sum(coef * value)`.
///
/// Features without a coefficient contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPredictor {
    #[serde(default)]
    intercept: f64,
    #[serde(default)]
    coefficients: BTreeMap<String, f64>,
}

impl LinearPredictor {
    /// Create a linear predictor, rejecting coefficients for unknown features
    pub fn new(intercept: f64, coefficients: BTreeMap<String, f64>) -> Result<Self> {
        let model = Self {
            intercept,
            coefficients,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse model coefficients from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load model coefficients from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &BTreeMap<String, f64> {
        &self.coefficients
    }

    fn validate(&self) -> Result<()> {
        if let Some(unknown) = self
            .coefficients
            .keys()
            .find(|name| !FeatureVector::COLUMNS.contains(&name.as_str()))
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Unknown feature in model coefficients: {}",
                unknown
            )));
        }

        Ok(())
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, features: &FeatureVector) -> std::result::Result<f64, PredictorError> {
        let weighted: f64 = FeatureVector::COLUMNS
            .iter()
            .zip(features.values())
            .filter_map(|(name, value)| self.coefficients.get(*name).map(|coef| coef * value))
            .sum();

        Ok(self.intercept + weighted)
    }
}
