//! Baseline predictors — reference models every real model must beat.
//!
//! Baselines are leakage-free by contract: `fit` sees only the training
//! target, and `predict` reads only the index of its feature frame, never the
//! values. A caller cannot smuggle future information through the frame.

use thiserror::Error;

use crate::domain::{FeatureFrame, ReturnSeries};

mod historical_mean;
mod random_normal;
mod zero;

pub use historical_mean::HistoricalMeanBaseline;
pub use random_normal::RandomNormalBaseline;
pub use zero::ZeroBaseline;

/// Errors from baseline lifecycle and input validation.
#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("baseline '{name}' is not fitted — call fit() before predict()")]
    NotFitted { name: String },

    #[error("baseline '{name}' cannot be fitted on an empty training series")]
    EmptyTraining { name: String },
}

/// The two-operation baseline contract.
///
/// Lifecycle: construct fresh per experiment (or per Monte Carlo trial),
/// `fit` exactly once, then `predict` any number of times. Stateful
/// implementations return [`BaselineError::NotFitted`] when predicted
/// before fitting; incremental re-fitting is not supported.
pub trait Baseline: Send + Sync {
    /// Human-readable name (e.g., "zero", "random_normal").
    fn name(&self) -> &str;

    /// Learn whatever statistics the baseline needs from the training target.
    fn fit(&mut self, y_train: &ReturnSeries) -> Result<(), BaselineError>;

    /// Predict one return per frame row, aligned to the frame's index.
    ///
    /// Implementations must use only `frame.dates()` / `frame.len()`.
    fn predict(&self, frame: &FeatureFrame) -> Result<ReturnSeries, BaselineError>;
}
