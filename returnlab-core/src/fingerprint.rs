//! Experiment fingerprinting — deterministic identification of runs.
//!
//! Two hashes identify a run:
//! - `config_hash`: BLAKE3 over the canonical JSON of the experiment
//!   parameters — identical parameters, identical hash.
//! - `dataset_hash`: BLAKE3 over the input bars (dates and prices), so a
//!   revised upstream dataset is visible in the manifest even when the
//!   parameters did not change.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Hex-encoded BLAKE3 digest.
pub type Digest = String;

/// Identity record persisted with every experiment result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentFingerprint {
    pub config_hash: Digest,
    pub dataset_hash: Digest,
}

impl ExperimentFingerprint {
    pub fn new<C: Serialize>(config: &C, bars: &[Bar]) -> Self {
        Self {
            config_hash: config_hash(config),
            dataset_hash: dataset_hash(bars),
        }
    }
}

/// BLAKE3 over the canonical JSON serialization of a config.
///
/// Configs must serialize with deterministic field order (struct fields or
/// BTreeMap keys) for the hash to be stable.
pub fn config_hash<C: Serialize>(config: &C) -> Digest {
    let json = serde_json::to_string(config).expect("config must serialize");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

/// BLAKE3 over bar dates and prices in input order.
pub fn dataset_hash(bars: &[Bar]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(bar.symbol.as_bytes());
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
        hasher.update(&bar.adj_close.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::Serialize;

    #[derive(Serialize)]
    struct FakeConfig {
        symbol: String,
        n_trials: usize,
    }

    fn sample_bar(close: f64) -> Bar {
        Bar {
            symbol: "SPY".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
            adj_close: close,
        }
    }

    #[test]
    fn config_hash_is_deterministic() {
        let config = FakeConfig {
            symbol: "SPY".into(),
            n_trials: 100,
        };
        assert_eq!(config_hash(&config), config_hash(&config));
    }

    #[test]
    fn config_hash_changes_with_params() {
        let a = FakeConfig {
            symbol: "SPY".into(),
            n_trials: 100,
        };
        let b = FakeConfig {
            symbol: "SPY".into(),
            n_trials: 200,
        };
        assert_ne!(config_hash(&a), config_hash(&b));
    }

    #[test]
    fn dataset_hash_sees_price_changes() {
        let a = vec![sample_bar(100.0)];
        let b = vec![sample_bar(100.5)];
        assert_ne!(dataset_hash(&a), dataset_hash(&b));
    }

    #[test]
    fn fingerprint_roundtrip() {
        let config = FakeConfig {
            symbol: "SPY".into(),
            n_trials: 100,
        };
        let fp = ExperimentFingerprint::new(&config, &[sample_bar(100.0)]);
        let json = serde_json::to_string(&fp).unwrap();
        let deser: ExperimentFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, deser);
    }
}
