//! Forecast run configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings shared by single-region forecasts and comparisons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Months to forecast
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    /// Upper bound on regions in one comparison
    #[serde(default = "default_max_comparison_regions")]
    pub max_comparison_regions: usize,
    /// Round the primary region's predictions when displaying them
    #[serde(default = "default_round_display")]
    pub round_display: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            max_comparison_regions: default_max_comparison_regions(),
            round_display: default_round_display(),
        }
    }
}

fn default_horizon() -> usize {
    36
}
fn default_max_comparison_regions() -> usize {
    3
}
fn default_round_display() -> bool {
    true
}

impl ForecastConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ForecastError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::ConfigError(
                "horizon must be at least 1".to_string(),
            ));
        }
        if self.max_comparison_regions == 0 {
            return Err(ForecastError::ConfigError(
                "max_comparison_regions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
