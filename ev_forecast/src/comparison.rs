//! Side-by-side forecasts for several regions
//!
//! Each region runs through the forecaster on its own. A failure in one
//! region is recorded in that region's outcome and the remaining regions
//! still run.

use crate::config::ForecastConfig;
use crate::data::EvDataset;
use crate::error::{ForecastError, Result};
use crate::forecaster::{forecast, Forecast, ForecastRequest};
use crate::predictor::Predictor;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Result of forecasting one region in a comparison
#[derive(Debug)]
pub struct RegionOutcome {
    pub region: String,
    pub result: Result<Forecast>,
}

impl RegionOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Line naming the region and either its final total or the failure kind
    pub fn describe(&self) -> String {
        match &self.result {
            Ok(forecast) => format!(
                "{}: {:.0} cumulative EVs by {}",
                self.region,
                forecast.final_cumulative().unwrap_or_default(),
                forecast
                    .points()
                    .last()
                    .map(|p| p.date.to_string())
                    .unwrap_or_default()
            ),
            Err(err) => format!("{}: {} ({})", self.region, err.kind(), err),
        }
    }

    /// Serializable view of the outcome
    pub fn to_record(&self) -> OutcomeRecord<'_> {
        match &self.result {
            Ok(forecast) => OutcomeRecord {
                region: &self.region,
                forecast: Some(forecast),
                error: None,
            },
            Err(err) => OutcomeRecord {
                region: &self.region,
                forecast: None,
                error: Some(ErrorRecord {
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutcomeRecord<'a> {
    pub region: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<&'a Forecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

#[derive(Debug, Serialize)]
pub struct ErrorRecord {
    pub kind: &'static str,
    pub message: String,
}

/// Outcomes of a comparison, in selection order
#[derive(Debug, Default)]
pub struct ComparisonReport {
    outcomes: Vec<RegionOutcome>,
}

impl ComparisonReport {
    pub fn outcomes(&self) -> &[RegionOutcome] {
        &self.outcomes
    }

    pub fn successes(&self) -> impl Iterator<Item = &Forecast> + '_ {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RegionOutcome> + '_ {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn records(&self) -> Vec<OutcomeRecord<'_>> {
        self.outcomes.iter().map(RegionOutcome::to_record).collect()
    }
}

fn check_selection<'a, I>(names: I, config: &ForecastConfig) -> Result<()>
where
    I: ExactSizeIterator<Item = &'a str>,
{
    let requested = names.len();
    if requested > config.max_comparison_regions {
        return Err(ForecastError::TooManyRegions {
            max: config.max_comparison_regions,
            requested,
        });
    }

    let mut seen = HashSet::with_capacity(requested);
    for name in names {
        if !seen.insert(name) {
            return Err(ForecastError::InvalidParameter(format!(
                "Region {} is selected more than once",
                name
            )));
        }
    }
    Ok(())
}

fn record(region: String, result: Result<Forecast>) -> RegionOutcome {
    if let Err(err) = &result {
        warn!(region = %region, kind = err.kind(), error = %err, "region forecast failed");
    }
    RegionOutcome { region, result }
}

/// Forecast prepared requests independently of each other
pub fn compare_requests<P>(
    requests: &[ForecastRequest],
    config: &ForecastConfig,
    predictor: &P,
) -> Result<ComparisonReport>
where
    P: Predictor + ?Sized,
{
    check_selection(requests.iter().map(|r| r.region.as_str()), config)?;

    let outcomes = requests
        .iter()
        .map(|request| record(request.region.clone(), forecast(request, predictor)))
        .collect();

    Ok(ComparisonReport { outcomes })
}

/// Forecast the selected regions of a dataset over the configured horizon
pub fn compare_regions<P, S>(
    dataset: &EvDataset,
    regions: &[S],
    config: &ForecastConfig,
    predictor: &P,
) -> Result<ComparisonReport>
where
    P: Predictor + ?Sized,
    S: AsRef<str>,
{
    check_selection(regions.iter().map(AsRef::<str>::as_ref), config)?;

    let outcomes = regions
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let result = dataset
                .region(name)
                .and_then(|history| history.seed())
                .and_then(|seed| forecast(&seed.request(config.horizon), predictor));
            record(name.to_string(), result)
        })
        .collect();

    Ok(ComparisonReport { outcomes })
}
