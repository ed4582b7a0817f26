//! ReturnLab Core — domain types, transforms, baselines, and data access.
//!
//! This crate contains the heart of the log-return baseline laboratory:
//! - Domain types (bars, return series, feature frames)
//! - Price-to-return transforms and simple indicators
//! - Augmented Dickey-Fuller stationarity test
//! - Baseline predictor trait + the three reference baselines
//! - Experiment fingerprinting
//! - Data providers (Stooq HTTP, CSV store, synthetic generator)

pub mod baselines;
pub mod data;
pub mod domain;
pub mod fingerprint;
pub mod stationarity;
pub mod transforms;
