use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ev_forecast::{
    compare_regions, forecast_region, EvDataset, ForecastConfig, ForecastSummary, LinearPredictor,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Forecast cumulative EV adoption per county
#[derive(Debug, Parser)]
#[command(name = "ev-forecast", version, about)]
struct Cli {
    /// Preprocessed county dataset (CSV)
    #[arg(long)]
    data: PathBuf,

    /// Linear model coefficients (JSON)
    #[arg(long)]
    model: PathBuf,

    /// Forecast settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Months to forecast, overrides the config file
    #[arg(long)]
    horizon: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the counties in the dataset
    Regions,
    /// Forecast a single county
    Forecast { region: String },
    /// Compare up to three counties
    Compare {
        #[arg(required = true)]
        regions: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ForecastConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ForecastConfig::default(),
    };
    if let Some(horizon) = cli.horizon {
        config = config.with_horizon(horizon);
        config.validate()?;
    }

    let dataset = EvDataset::from_csv(&cli.data)
        .with_context(|| format!("loading dataset {}", cli.data.display()))?;
    info!(rows = dataset.len(), horizon = config.horizon, "dataset ready");

    match cli.command {
        Command::Regions => {
            for region in dataset.regions() {
                println!("{}", region);
            }
        }
        Command::Forecast { region } => {
            let model = LinearPredictor::from_json_file(&cli.model)
                .with_context(|| format!("loading model {}", cli.model.display()))?;
            let history = dataset.region(&region)?;
            let summary = forecast_region(&history, &config, &model)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, config.round_display);
            }
        }
        Command::Compare { regions } => {
            let model = LinearPredictor::from_json_file(&cli.model)
                .with_context(|| format!("loading model {}", cli.model.display()))?;
            let report = compare_regions(&dataset, &regions, &config, &model)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.records())?);
            } else {
                for outcome in report.outcomes() {
                    println!("{}", outcome.describe());
                }
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &ForecastSummary, round: bool) {
    println!("Cumulative EV forecast for {}", summary.region());
    println!("{:<12} {:>14} {:>16}", "Date", "Predicted", "Cumulative");

    for point in summary.forecast().points() {
        if round {
            println!(
                "{:<12} {:>14.0} {:>16.0}",
                point.date.to_string(),
                point.rounded(),
                point.cumulative.round()
            );
        } else {
            println!(
                "{:<12} {:>14.2} {:>16.2}",
                point.date.to_string(),
                point.predicted,
                point.cumulative
            );
        }
    }

    println!();
    println!("{}", summary.message());
}
