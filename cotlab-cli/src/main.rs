//! COTLab CLI — compute chart overlays from exported service data.
//!
//! Commands:
//! - `zones` — threshold zone/line signals for the selected participant
//! - `composite` — composite cycle overlay over a price export
//! - `params` — print the default parameter file

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cotlab_core::data::{load_cycles_json, load_series_json, LookbackRange};
use cotlab_core::{AnalysisParams, ParameterStore};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "cotlab",
    about = "COTLab CLI — positioning zones and cycle overlays"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract threshold signals from a COT series export (JSON).
    Zones {
        /// Path to the series JSON (array or {"data": [...]}).
        #[arg(long)]
        series: PathBuf,

        /// Path to a TOML parameter file. Defaults apply when omitted.
        #[arg(long)]
        params: Option<PathBuf>,

        /// Lookback range (1M, 6M, 1Y, 3Y, 5Y, 10Y, All). Overrides the params file.
        #[arg(long)]
        range: Option<LookbackRange>,

        /// Reference date for the range window (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        today: Option<String>,
    },
    /// Reconstruct the composite cycle overlay over a price export (JSON).
    Composite {
        /// Path to the price JSON with per-point trend.
        #[arg(long)]
        series: PathBuf,

        /// Path to the cycle scan JSON (array or {"cycles": [...]}).
        #[arg(long)]
        cycles: PathBuf,

        /// Path to a TOML parameter file. Defaults apply when omitted.
        #[arg(long)]
        params: Option<PathBuf>,

        /// Lookback range (1M, 6M, 1Y, 3Y, 5Y, 10Y, All). Overrides the params file.
        #[arg(long)]
        range: Option<LookbackRange>,

        /// Reference date for the range window (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        today: Option<String>,

        /// Cycle ids to activate, replacing the automatic top-N selection.
        #[arg(long = "select", value_delimiter = ',')]
        select: Vec<String>,
    },
    /// Print the default parameter file as TOML.
    Params,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Zones {
            series,
            params,
            range,
            today,
        } => run_zones(&series, params.as_deref(), range, today),
        Commands::Composite {
            series,
            cycles,
            params,
            range,
            today,
            select,
        } => run_composite(&series, &cycles, params.as_deref(), range, today, select),
        Commands::Params => {
            print!("{}", AnalysisParams::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn run_zones(
    series_path: &Path,
    params_path: Option<&Path>,
    range: Option<LookbackRange>,
    today: Option<String>,
) -> Result<()> {
    let mut store = build_store(params_path, range)?;
    let series = load_series_json(&read(series_path)?)
        .with_context(|| format!("parse series {}", series_path.display()))?;
    store.set_positioning(series)?;

    let signals = match reference_date(today)? {
        Some(today) => store.visible_signals_at(today),
        None => store.visible_signals(),
    };
    log::info!(
        "{} ({}): {} signals ({} in range)",
        store.params().participant.label(),
        store.params().field_key(),
        store.signals().len(),
        signals.len()
    );
    println!("{}", serde_json::to_string_pretty(&signals)?);
    Ok(())
}

fn run_composite(
    series_path: &Path,
    cycles_path: &Path,
    params_path: Option<&Path>,
    range: Option<LookbackRange>,
    today: Option<String>,
    select: Vec<String>,
) -> Result<()> {
    let mut store = build_store(params_path, range)?;
    let prices = load_series_json(&read(series_path)?)
        .with_context(|| format!("parse series {}", series_path.display()))?;
    let cycles = load_cycles_json(&read(cycles_path)?)
        .with_context(|| format!("parse cycles {}", cycles_path.display()))?;

    store.set_prices(prices)?;
    store.set_cycles(cycles)?;
    if !select.is_empty() {
        let mut params = store.params().clone();
        params.selected_cycles = select.into_iter().collect();
        store.set_params(params)?;
    }

    let points = match reference_date(today)? {
        Some(today) => store.visible_composite_at(today),
        None => store.visible_composite(),
    };
    log::info!(
        "{} active cycles, {} of {} composite points in range carry a value",
        store.params().selected_cycles.len(),
        points.iter().filter(|p| p.is_active()).count(),
        points.len()
    );
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

fn build_store(params_path: Option<&Path>, range: Option<LookbackRange>) -> Result<ParameterStore> {
    let mut params = match params_path {
        Some(path) => AnalysisParams::from_toml_str(&read(path)?)
            .with_context(|| format!("load params {}", path.display()))?,
        None => AnalysisParams::default(),
    };
    if let Some(range) = range {
        params.range = range;
    }
    Ok(ParameterStore::new(params)?)
}

fn reference_date(today: Option<String>) -> Result<Option<NaiveDate>> {
    today
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("parse --today")
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
