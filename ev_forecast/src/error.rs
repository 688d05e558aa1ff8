//! Error types for the ev_forecast crate

use crate::predictor::PredictorError;
use ev_math::MathError;
use thiserror::Error;

/// Custom error types for the ev_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A region does not have a full window of history to seed the forecast
    #[error("Insufficient history for {region}: need {expected} observations, got {actual}")]
    InsufficientHistory {
        region: String,
        expected: usize,
        actual: usize,
    },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The injected predictor failed; the source is passed through untouched
    #[error("Predictor failure: {0}")]
    Predictor(#[source] PredictorError),

    /// A forecast date fell outside the representable calendar
    #[error("Forecast date out of range: {0}")]
    DateOutOfRange(String),

    /// More regions were selected for comparison than allowed
    #[error("Too many regions to compare: {requested} selected, at most {max} allowed")]
    TooManyRegions { max: usize, requested: usize },

    /// The requested region is absent from the dataset
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error while reading or validating configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ForecastError {
    /// Short name of the failure kind, used when reporting per-region failures
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::InsufficientHistory { .. } => "insufficient history",
            ForecastError::InvalidParameter(_) => "invalid parameter",
            ForecastError::Predictor(_) => "predictor failure",
            ForecastError::DateOutOfRange(_) => "date out of range",
            ForecastError::TooManyRegions { .. } => "too many regions",
            ForecastError::RegionNotFound(_) => "region not found",
            ForecastError::DataError(_) => "data error",
            ForecastError::ConfigError(_) => "config error",
            ForecastError::MathError(_) => "math error",
            ForecastError::IoError(_) => "io error",
            ForecastError::CsvError(_) => "csv error",
            ForecastError::JsonError(_) => "json error",
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PredictorError> for ForecastError {
    fn from(err: PredictorError) -> Self {
        ForecastError::Predictor(err)
    }
}
