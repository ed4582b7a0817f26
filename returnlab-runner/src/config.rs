//! Serializable experiment configuration.
//!
//! One TOML file captures everything needed to reproduce an experiment:
//! symbol, date range, split fraction, Monte Carlo trial count, risk-free
//! rate, and the data directory. `config_id()` hashes the canonical JSON
//! form so identical configs always share an identity.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use returnlab_core::fingerprint;

/// Unique identifier for an experiment configuration (content hash).
pub type ConfigId = String;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("start date {start} is not before end date {end}")]
    BadDateRange { start: NaiveDate, end: NaiveDate },

    #[error("test fraction must be in (0, 1), got {0}")]
    BadTestFraction(f64),

    #[error("trial count must be at least 1")]
    ZeroTrials,
}

/// Full parameter set for one experiment run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentConfig {
    /// Ticker to evaluate.
    pub symbol: String,

    /// History start date (inclusive).
    pub start_date: NaiveDate,

    /// History end date (inclusive).
    pub end_date: NaiveDate,

    /// Share of observations held out at the end for testing.
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,

    /// Monte Carlo trials for the random baseline.
    #[serde(default = "default_n_trials")]
    pub n_trials: usize,

    /// Annual risk-free rate for Sharpe.
    #[serde(default)]
    pub risk_free_rate: f64,

    /// Lagged difference terms in the stationarity regression.
    #[serde(default = "default_adf_lags")]
    pub adf_lags: usize,

    /// Root directory of the CSV bar store.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_n_trials() -> usize {
    100
}

fn default_adf_lags() -> usize {
    1
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl ExperimentConfig {
    /// A ready-to-run config for a symbol with every knob at its default.
    pub fn for_symbol(symbol: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.to_string(),
            start_date: start,
            end_date: end,
            test_fraction: default_test_fraction(),
            n_trials: default_n_trials(),
            risk_free_rate: 0.0,
            adf_lags: default_adf_lags(),
            data_dir: default_data_dir(),
        }
    }

    /// Load and validate a config from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        if self.start_date >= self.end_date {
            return Err(ConfigError::BadDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ConfigError::BadTestFraction(self.test_fraction));
        }
        if self.n_trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    pub fn config_id(&self) -> ConfigId {
        fingerprint::config_hash(self)
    }
}
