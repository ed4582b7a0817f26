//! Chronological train/test split.
//!
//! A holdout split for time series: the test window sits strictly after the
//! training window. A shuffled split would leak future observations into
//! training, so it is not offered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use returnlab_core::domain::{FeatureFrame, ReturnSeries};

/// Errors from splitting a series for evaluation.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("test fraction must be in (0, 1), got {0}")]
    BadFraction(f64),

    #[error("series of {len} observations leaves an empty {side} window at fraction {fraction}")]
    EmptyWindow {
        len: usize,
        fraction: f64,
        side: &'static str,
    },
}

/// Result of a chronological holdout split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainTestSplit {
    pub y_train: ReturnSeries,
    pub y_test: ReturnSeries,
    /// Feature frame over the test window, for baseline prediction.
    pub x_test: FeatureFrame,
}

/// Split a return series into a training prefix and a test suffix.
///
/// `test_fraction` is the share of observations held out at the end;
/// both windows must end up non-empty.
pub fn chronological_split(
    series: &ReturnSeries,
    test_fraction: f64,
) -> Result<TrainTestSplit, SplitError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::BadFraction(test_fraction));
    }

    let n = series.len();
    let n_test = (n as f64 * test_fraction).round() as usize;
    let n_train = n.saturating_sub(n_test);

    if n_train == 0 {
        return Err(SplitError::EmptyWindow {
            len: n,
            fraction: test_fraction,
            side: "training",
        });
    }
    if n_test == 0 {
        return Err(SplitError::EmptyWindow {
            len: n,
            fraction: test_fraction,
            side: "test",
        });
    }

    let (y_train, y_test) = series.split_at(n_train);
    let x_test = FeatureFrame::from_series_index(&y_test);

    Ok(TrainTestSplit {
        y_train,
        y_test,
        x_test,
    })
}
