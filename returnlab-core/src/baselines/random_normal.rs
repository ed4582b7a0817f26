//! Random-normal baseline — draws from N(mean, std) of the training target.
//!
//! A sanity floor rather than a model: any predictor that cannot beat noise
//! calibrated to the training distribution has learned nothing. The generator
//! is seeded at construction, so a (seed, fit statistics, row count) triple
//! always reproduces the same draw sequence.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{FeatureFrame, ReturnSeries};

use super::{Baseline, BaselineError};

/// Fitted statistics: mean and sample standard deviation of the training target.
#[derive(Debug, Clone, Copy)]
struct FitStats {
    mean: f64,
    std: f64,
}

/// Baseline that predicts i.i.d. normal noise matched to the training target.
#[derive(Debug, Clone)]
pub struct RandomNormalBaseline {
    seed: u64,
    stats: Option<FitStats>,
}

impl RandomNormalBaseline {
    /// The seed fixes the draw sequence; Monte Carlo trials use seed = trial index.
    pub fn new(seed: u64) -> Self {
        Self { seed, stats: None }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Baseline for RandomNormalBaseline {
    fn name(&self) -> &str {
        "random_normal"
    }

    fn fit(&mut self, y_train: &ReturnSeries) -> Result<(), BaselineError> {
        if y_train.is_empty() {
            return Err(BaselineError::EmptyTraining {
                name: self.name().to_string(),
            });
        }
        // Sample (n-1) std, matching the original pandas default.
        self.stats = Some(FitStats {
            mean: y_train.mean(),
            std: y_train.std_dev(),
        });
        Ok(())
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<ReturnSeries, BaselineError> {
        let stats = self.stats.ok_or_else(|| BaselineError::NotFitted {
            name: self.name().to_string(),
        })?;

        // Fresh generator per predict call: same seed + same stats + same
        // row count => identical output, regardless of call history.
        let mut rng = StdRng::seed_from_u64(self.seed);
        let normal = Normal::new(stats.mean, stats.std).expect("fitted std is finite and >= 0");

        let values: Vec<f64> = (0..frame.len()).map(|_| normal.sample(&mut rng)).collect();

        Ok(ReturnSeries::new(frame.dates().to_vec(), values)
            .expect("frame index is valid by construction"))
    }
}
