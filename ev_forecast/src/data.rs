//! Historical EV registration data
//!
//! Reads the preprocessed per-county monthly dataset and turns a county's
//! history into the seed windows of a forecast run.

use crate::error::{ForecastError, Result};
use crate::forecaster::{ForecastRequest, WINDOW_SIZE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::debug;

/// One row of the preprocessed dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "County")]
    pub county: Option<String>,
    pub county_encoded: i64,
    pub months_since_start: i64,
    #[serde(rename = "Electric Vehicle (EV) Total")]
    pub ev_total: f64,
}

/// A single monthly observation of a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub months_since_start: i64,
    pub ev_total: f64,
}

/// Dataset of monthly EV totals for every region
#[derive(Debug, Clone, Default)]
pub struct EvDataset {
    records: Vec<EvRecord>,
}

impl EvDataset {
    /// Load the dataset from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path)?;
        let dataset = Self::read(reader)?;
        debug!(path = %path.display(), rows = dataset.len(), "loaded EV dataset");
        Ok(dataset)
    }

    /// Load the dataset from any CSV source with a header row
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::read(csv::Reader::from_reader(reader))
    }

    /// Build a dataset from records already in memory
    pub fn from_records(records: Vec<EvRecord>) -> Self {
        Self { records }
    }

    fn read<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<EvRecord>, csv::Error>>()?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, de-duplicated names of all regions; rows without a county are skipped
    pub fn regions(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.county.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// History of one region, sorted by date
    pub fn region(&self, name: &str) -> Result<RegionHistory> {
        let rows: Vec<&EvRecord> = self
            .records
            .iter()
            .filter(|r| r.county.as_deref() == Some(name))
            .collect();

        // code of the earliest observation, ties resolved in file order
        let code = match rows.iter().min_by_key(|r| r.date) {
            Some(earliest) => earliest.county_encoded,
            None => return Err(ForecastError::RegionNotFound(name.to_string())),
        };

        let observations = rows
            .iter()
            .map(|r| Observation {
                date: r.date,
                months_since_start: r.months_since_start,
                ev_total: r.ev_total,
            })
            .collect();

        RegionHistory::new(name, code, observations)
    }
}

/// Chronological history of one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionHistory {
    name: String,
    code: i64,
    observations: Vec<Observation>,
}

impl RegionHistory {
    /// Create a history from observations in any order
    pub fn new(name: impl Into<String>, code: i64, mut observations: Vec<Observation>) -> Result<Self> {
        let name = name.into();
        if observations.is_empty() {
            return Err(ForecastError::DataError(format!(
                "Region {} has no observations",
                name
            )));
        }

        observations.sort_by_key(|o| o.date);
        Ok(Self {
            name,
            code,
            observations,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Highest month counter seen for the region
    pub fn latest_index(&self) -> i64 {
        self.observations
            .iter()
            .map(|o| o.months_since_start)
            .max()
            .unwrap_or_default()
    }

    /// Most recent observation date
    pub fn latest_date(&self) -> NaiveDate {
        // non-empty and sorted by construction
        self.observations[self.observations.len() - 1].date
    }

    /// Running total of EV counts over the full history
    pub fn cumulative_series(&self) -> Vec<(NaiveDate, f64)> {
        self.observations
            .iter()
            .scan(0.0, |total, o| {
                *total += o.ev_total;
                Some((o.date, *total))
            })
            .collect()
    }

    /// Final value of the running total
    pub fn historical_total(&self) -> f64 {
        self.observations.iter().map(|o| o.ev_total).sum()
    }

    /// Seed windows from the trailing observations
    pub fn seed(&self) -> Result<ForecastSeed> {
        if self.observations.len() < WINDOW_SIZE {
            return Err(ForecastError::InsufficientHistory {
                region: self.name.clone(),
                expected: WINDOW_SIZE,
                actual: self.observations.len(),
            });
        }

        let history: Vec<f64> = self.observations[self.observations.len() - WINDOW_SIZE..]
            .iter()
            .map(|o| o.ev_total)
            .collect();
        let cumulative = history
            .iter()
            .scan(0.0, |total, v| {
                *total += v;
                Some(*total)
            })
            .collect();

        Ok(ForecastSeed {
            region: self.name.clone(),
            region_code: self.code,
            history,
            cumulative,
            start_index: self.latest_index(),
            start_date: self.latest_date(),
            historical_total: self.historical_total(),
        })
    }
}

/// Trailing windows and anchors extracted from a region's history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeed {
    pub region: String,
    pub region_code: i64,
    /// Last raw observations, oldest first
    pub history: Vec<f64>,
    /// Running sum over `history` only
    pub cumulative: Vec<f64>,
    pub start_index: i64,
    pub start_date: NaiveDate,
    /// Running total over the full history
    pub historical_total: f64,
}

impl ForecastSeed {
    /// Forecast request for `horizon` months; emitted totals continue from the full history
    pub fn request(&self, horizon: usize) -> ForecastRequest {
        ForecastRequest::new(
            self.region.clone(),
            self.region_code,
            self.history.clone(),
            self.cumulative.clone(),
            self.start_index,
            self.start_date,
            horizon,
        )
        .with_cumulative_base(self.historical_total)
    }
}
