//! Price-to-return transforms and simple rolling indicators.
//!
//! All transforms are pure functions over bars or raw slices. Warmup rows
//! (the prefix a rolling window cannot fill) are NaN, first valid value at
//! index window-1; the log-return transform instead drops the first bar,
//! which has no prior period.

use thiserror::Error;

use crate::domain::{Bar, ReturnSeries, SeriesError};

/// Errors from transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("non-positive price {price} at position {position} — log-returns undefined")]
    NonPositivePrice { position: usize, price: f64 },

    #[error("need at least 2 bars to compute returns, got {count}")]
    TooFewBars { count: usize },

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Compute log-returns `ln(P_t / P_{t-1})` from daily bars.
///
/// Uses `adj_close` when finite, `close` otherwise. The first bar is dropped
/// (no prior period), so the output is one element shorter than the input.
pub fn log_returns(bars: &[Bar]) -> Result<ReturnSeries, TransformError> {
    if bars.len() < 2 {
        return Err(TransformError::TooFewBars { count: bars.len() });
    }

    let price = |bar: &Bar| {
        if bar.adj_close.is_finite() {
            bar.adj_close
        } else {
            bar.close
        }
    };

    for (i, bar) in bars.iter().enumerate() {
        let p = price(bar);
        if !(p > 0.0) {
            return Err(TransformError::NonPositivePrice { position: i, price: p });
        }
    }

    let dates = bars[1..].iter().map(|b| b.date).collect();
    let values = bars
        .windows(2)
        .map(|w| (price(&w[1]) / price(&w[0])).ln())
        .collect();

    Ok(ReturnSeries::new(dates, values)?)
}

/// Rolling mean over `window` observations.
///
/// Output has the input's length; the first `window - 1` entries are NaN.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "moving average window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = sum / window as f64;

    for i in window..n {
        sum = sum - values[i - window] + values[i];
        result[i] = sum / window as f64;
    }
    result
}

/// Z-score normalization against the slice's own mean and sample std.
///
/// A zero-variance slice normalizes to all zeros rather than NaN.
pub fn zscore(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n < 2 {
        0.0
    } else {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    };
    if std < 1e-15 {
        return vec![0.0; n];
    }
    values.iter().map(|v| (v - mean) / std).collect()
}

/// Relative Strength Index over `window` periods (Wilder smoothing).
///
/// RSI = 100 - 100 / (1 + avg_gain / avg_loss). First valid value at index
/// `window`; edge cases: avg_loss == 0 → 100, avg_gain == 0 → 0.
pub fn rsi(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "RSI window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window + 1 {
        return result;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=window {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= window as f64;
    avg_loss /= window as f64;

    result[window] = rsi_value(avg_gain, avg_loss);

    let alpha = 1.0 / window as f64;
    for i in (window + 1)..n {
        let change = values[i] - values[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = avg_gain * (1.0 - alpha) + gain * alpha;
        avg_loss = avg_loss * (1.0 - alpha) + loss * alpha;
        result[i] = rsi_value(avg_gain, avg_loss);
    }
    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss < 1e-15 {
        if avg_gain < 1e-15 {
            return 50.0; // no movement at all
        }
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
