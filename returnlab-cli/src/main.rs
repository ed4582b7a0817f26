//! ReturnLab CLI — fetch, run, and stationarity commands.
//!
//! Commands:
//! - `fetch` — download daily bars from Stooq into the CSV store
//! - `run` — execute a baseline comparison experiment from a TOML config or flags
//! - `stationarity` — ADF-test the log-returns of a stored symbol

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use returnlab_core::data::{CsvStore, DataProvider, StooqProvider};
use returnlab_core::stationarity::adf_test;
use returnlab_core::transforms::log_returns;
use returnlab_runner::data_loader::RAW_FOLDER;
use returnlab_runner::{export, run_experiment, ExperimentConfig};

#[derive(Parser)]
#[command(
    name = "returnlab",
    about = "ReturnLab CLI — log-return baseline comparison laboratory"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily bars from Stooq into the CSV store.
    Fetch {
        /// Symbols to fetch (e.g., SPY QQQ AAPL).
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Start date (YYYY-MM-DD). Defaults to 10 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Data directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Run a baseline comparison experiment.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbol (required without --config).
        #[arg(long)]
        symbol: Option<String>,

        /// Start date (YYYY-MM-DD). Defaults to 5 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Monte Carlo trials for the random baseline.
        #[arg(long)]
        trials: Option<usize>,

        /// Test fraction of the return series.
        #[arg(long)]
        test_fraction: Option<f64>,

        /// Offline mode: no network access.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Use synthetic data as fallback.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Data directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Report an ADF stationarity test for a stored symbol's log-returns.
    Stationarity {
        /// Symbol to test (must be in the store; run `fetch` first).
        symbol: String,

        /// Lagged difference terms in the regression.
        #[arg(long, default_value_t = 1)]
        lags: usize,

        /// Data directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            symbols,
            start,
            end,
            data_dir,
        } => run_fetch(symbols, start, end, data_dir),
        Commands::Run {
            config,
            symbol,
            start,
            end,
            trials,
            test_fraction,
            offline,
            synthetic,
            data_dir,
            output_dir,
        } => run_experiment_cmd(
            config, symbol, start, end, trials, test_fraction, offline, synthetic, data_dir,
            output_dir,
        ),
        Commands::Stationarity {
            symbol,
            lags,
            data_dir,
        } => run_stationarity(&symbol, lags, &data_dir),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn date_or_days_ago(arg: Option<&str>, days_ago: i64) -> Result<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive() - chrono::Duration::days(days_ago)),
    }
}

fn run_fetch(
    symbols: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    data_dir: PathBuf,
) -> Result<()> {
    let start_date = date_or_days_ago(start.as_deref(), 365 * 10)?;
    let end_date = date_or_days_ago(end.as_deref(), 0)?;

    let provider = StooqProvider::new();
    let store = CsvStore::new(&data_dir);

    let mut failures = 0usize;
    for symbol in &symbols {
        print!("Fetching {symbol}... ");
        match provider.fetch(symbol, start_date, end_date) {
            Ok(result) => {
                store.save(symbol, RAW_FOLDER, &result.bars)?;
                println!("{} bars", result.bars.len());
            }
            Err(e) => {
                println!("FAILED");
                eprintln!("Error for {symbol}: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} symbols failed", symbols.len());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_experiment_cmd(
    config_path: Option<PathBuf>,
    symbol: Option<String>,
    start: Option<String>,
    end: Option<String>,
    trials: Option<usize>,
    test_fraction: Option<f64>,
    offline: bool,
    synthetic: bool,
    data_dir: PathBuf,
    output_dir: PathBuf,
) -> Result<()> {
    if config_path.is_some() && symbol.is_some() {
        bail!("--config and --symbol are mutually exclusive");
    }

    let mut config = if let Some(path) = config_path {
        ExperimentConfig::from_path(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?
    } else {
        let Some(symbol) = symbol else {
            bail!("one of --config or --symbol is required");
        };
        let start_date = date_or_days_ago(start.as_deref(), 365 * 5)?;
        let end_date = date_or_days_ago(end.as_deref(), 0)?;
        ExperimentConfig::for_symbol(&symbol, start_date, end_date)
    };

    if let Some(trials) = trials {
        config.n_trials = trials;
    }
    if let Some(fraction) = test_fraction {
        config.test_fraction = fraction;
    }
    config.data_dir = data_dir.to_string_lossy().into_owned();

    let provider = StooqProvider::new();
    let provider_ref: Option<&dyn DataProvider> = if offline { None } else { Some(&provider) };

    let result = run_experiment(&config, provider_ref, synthetic)?;

    print!("{}", export::render_summary(&result));

    let paths = export::save_artifacts(&result, &output_dir)?;
    println!("\nArtifacts saved to: {}", paths.run_dir.display());

    Ok(())
}

fn run_stationarity(symbol: &str, lags: usize, data_dir: &PathBuf) -> Result<()> {
    let store = CsvStore::new(data_dir);
    let bars = store
        .load(symbol, RAW_FOLDER)
        .with_context(|| format!("no stored data for {symbol}; run `fetch {symbol}` first"))?;

    let returns = log_returns(&bars)?;
    let report = adf_test("Log_Returns", returns.values(), lags)?;

    println!("{symbol}: {} bars, {} returns", bars.len(), returns.len());
    println!(
        "ADF({}) on {}: statistic {:.4} over {} observations",
        report.lags, report.name, report.statistic, report.n_obs
    );
    println!(
        "critical values: 1% {:.2} | 5% {:.2} | 10% {:.2}",
        report.critical_1pct, report.critical_5pct, report.critical_10pct
    );
    println!("verdict: {}", report.verdict());

    Ok(())
}
