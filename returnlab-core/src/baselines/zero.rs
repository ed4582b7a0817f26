//! Zero baseline — the martingale assumption for returns.
//!
//! Predicts 0.0 at every step: under a random walk in prices, the best guess
//! for the next log-return is no change.

use crate::domain::{FeatureFrame, ReturnSeries};

use super::{Baseline, BaselineError};

/// Stateless naive baseline; `fit` is a no-op.
#[derive(Debug, Clone, Default)]
pub struct ZeroBaseline;

impl ZeroBaseline {
    pub fn new() -> Self {
        Self
    }
}

impl Baseline for ZeroBaseline {
    fn name(&self) -> &str {
        "zero"
    }

    fn fit(&mut self, _y_train: &ReturnSeries) -> Result<(), BaselineError> {
        Ok(())
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<ReturnSeries, BaselineError> {
        // The frame's index is already validated; constant() cannot fail here.
        Ok(ReturnSeries::constant(frame.dates().to_vec(), 0.0)
            .expect("frame index is valid by construction"))
    }
}
