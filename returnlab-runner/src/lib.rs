//! ReturnLab Runner — metric engine, comparison driver, experiment orchestration.
//!
//! This crate builds on `returnlab-core` to provide:
//! - The regression/risk metric engine (MSE, RMSE, MAE, R2, directional
//!   accuracy, annualized strategy Sharpe)
//! - Chronological train/test splitting
//! - The Monte Carlo baseline comparison driver
//! - TOML experiment configuration
//! - Data loading with store/download/synthetic fallback
//! - The end-to-end experiment runner and artifact export

pub mod comparison;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod runner;
pub mod split;

pub use comparison::{
    run_baseline_comparison, ComparisonConfig, ComparisonError, ComparisonRow, ComparisonTable,
};
pub use config::{ConfigError, ConfigId, ExperimentConfig};
pub use data_loader::{load_bars, LoadError, LoadOptions, LoadedData};
pub use export::{render_summary, render_table, save_artifacts, ArtifactPaths};
pub use metrics::{evaluate_regression, sharpe_ratio, MetricError, RegressionMetrics};
pub use runner::{run_experiment, ExperimentResult, RunError, SCHEMA_VERSION};
pub use split::{chronological_split, SplitError, TrainTestSplit};
