//! Historical-mean baseline — the best constant predictor.
//!
//! Predicting the training mean minimizes MSE among constant predictions.
//! On the trading side a (positive) constant forecast is a standing long
//! signal, so this row doubles as the buy-and-hold market benchmark.

use crate::domain::{FeatureFrame, ReturnSeries};

use super::{Baseline, BaselineError};

#[derive(Debug, Clone, Default)]
pub struct HistoricalMeanBaseline {
    mean: Option<f64>,
}

impl HistoricalMeanBaseline {
    pub fn new() -> Self {
        Self { mean: None }
    }

    /// The fitted training mean, if any.
    pub fn fitted_mean(&self) -> Option<f64> {
        self.mean
    }
}

impl Baseline for HistoricalMeanBaseline {
    fn name(&self) -> &str {
        "historical_mean"
    }

    fn fit(&mut self, y_train: &ReturnSeries) -> Result<(), BaselineError> {
        if y_train.is_empty() {
            return Err(BaselineError::EmptyTraining {
                name: self.name().to_string(),
            });
        }
        self.mean = Some(y_train.mean());
        Ok(())
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<ReturnSeries, BaselineError> {
        let mean = self.mean.ok_or_else(|| BaselineError::NotFitted {
            name: self.name().to_string(),
        })?;
        Ok(ReturnSeries::constant(frame.dates().to_vec(), mean)
            .expect("frame index is valid by construction"))
    }
}
