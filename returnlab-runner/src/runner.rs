//! Experiment orchestration — load, transform, test, split, compare.
//!
//! `run_experiment` is the single entry point that turns an
//! `ExperimentConfig` into an `ExperimentResult`:
//! bars → log-returns → ADF stationarity report → chronological split →
//! baseline comparison, with a fingerprint over config and data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use returnlab_core::data::{CsvStore, DataProvider, DataSource};
use returnlab_core::fingerprint::ExperimentFingerprint;
use returnlab_core::stationarity::{adf_test, AdfReport, StationarityError};
use returnlab_core::transforms::{log_returns, TransformError};

use crate::comparison::{run_baseline_comparison, ComparisonConfig, ComparisonError, ComparisonTable};
use crate::config::{ConfigError, ExperimentConfig};
use crate::data_loader::{load_bars, LoadError, LoadOptions};
use crate::split::{chronological_split, SplitError};

/// Bumped whenever the serialized result layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from running a full experiment.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("stationarity error: {0}")]
    Stationarity(#[from] StationarityError),

    #[error("split error: {0}")]
    Split(#[from] SplitError),

    #[error("comparison error: {0}")]
    Comparison(#[from] ComparisonError),
}

/// Everything one experiment run produced, serializable as the result manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub schema_version: u32,
    pub config: ExperimentConfig,
    pub fingerprint: ExperimentFingerprint,
    pub data_source: DataSource,
    pub n_bars: usize,
    pub n_returns: usize,
    pub train_len: usize,
    pub test_len: usize,
    pub stationarity: AdfReport,
    pub table: ComparisonTable,
}

impl ExperimentResult {
    /// True when the run used generated rather than market data.
    pub fn is_synthetic(&self) -> bool {
        self.data_source == DataSource::Synthetic
    }
}

/// Run one experiment end to end.
///
/// `provider` is consulted when the store has no data for the symbol;
/// `synthetic` enables the offline fallback.
pub fn run_experiment(
    config: &ExperimentConfig,
    provider: Option<&dyn DataProvider>,
    synthetic: bool,
) -> Result<ExperimentResult, RunError> {
    config.validate()?;

    let store = CsvStore::new(&config.data_dir);
    let loaded = load_bars(
        &config.symbol,
        &store,
        provider,
        &LoadOptions {
            start: config.start_date,
            end: config.end_date,
            synthetic,
            force: false,
        },
    )?;

    let returns = log_returns(&loaded.bars)?;
    let stationarity = adf_test("Log_Returns", returns.values(), config.adf_lags)?;

    let split = chronological_split(&returns, config.test_fraction)?;
    let table = run_baseline_comparison(
        &split.y_train,
        &split.y_test,
        &split.x_test,
        &ComparisonConfig {
            n_trials: config.n_trials,
            risk_free_rate: config.risk_free_rate,
        },
    )?;

    Ok(ExperimentResult {
        schema_version: SCHEMA_VERSION,
        config: config.clone(),
        fingerprint: ExperimentFingerprint::new(config, &loaded.bars),
        data_source: loaded.source,
        n_bars: loaded.bars.len(),
        n_returns: returns.len(),
        train_len: split.y_train.len(),
        test_len: split.y_test.len(),
        stationarity,
        table,
    })
}
