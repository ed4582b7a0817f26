//! Regression and risk metrics — pure functions that score predictions.
//!
//! Every metric is a pure function: predicted and realized return slices in,
//! scalar out. No dependencies on the runner, data pipeline, or baselines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use returnlab_core::domain::ReturnSeries;

/// Trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Errors from metric evaluation on malformed inputs.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("cannot evaluate metrics on empty series")]
    EmptyInput,

    #[error("prediction and target lengths differ: {y_true} true vs {y_pred} predicted")]
    LengthMismatch { y_true: usize, y_pred: usize },

    #[error("prediction and target indexes are not aligned")]
    IndexMismatch,
}

/// Full regression scorecard for one prediction series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
    /// Fraction of rows where sign(prediction) matches sign(realized).
    pub directional_accuracy: f64,
    /// Annualized Sharpe of the sign-following strategy.
    pub strategy_sharpe: f64,
}

/// Annualized Sharpe ratio from daily returns.
///
/// Sharpe = mean(excess) / std(excess) * sqrt(252), where the daily excess
/// return is r - risk_free_rate/252 and std is the sample (n-1) deviation.
/// Empty input, a single observation, or zero variance all return the 0.0
/// sentinel rather than NaN or an error.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let daily_rf = risk_free_rate / TRADING_DAYS;
    let excess: Vec<f64> = returns.iter().map(|r| r - daily_rf).collect();
    let mean = mean_f64(&excess);
    let std = std_dev(&excess);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * TRADING_DAYS.sqrt()
}

/// Sign with zero counted as positive.
///
/// A zero prediction is treated as "not down", so flat forecasts take a long
/// stance and a flat realized return scores as a correct call for them.
pub fn non_negative_sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Score a prediction series against the realized target.
///
/// Errors on empty input and on any length or index disagreement; alignment
/// bugs upstream should never degrade silently into wrong numbers.
pub fn evaluate_regression(
    y_true: &ReturnSeries,
    y_pred: &ReturnSeries,
    risk_free_rate: f64,
) -> Result<RegressionMetrics, MetricError> {
    if y_true.is_empty() || y_pred.is_empty() {
        return Err(MetricError::EmptyInput);
    }
    if y_true.len() != y_pred.len() {
        return Err(MetricError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if !y_true.is_aligned_with(y_pred) {
        return Err(MetricError::IndexMismatch);
    }

    let actual = y_true.values();
    let predicted = y_pred.values();
    let n = actual.len() as f64;

    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let mse = sse / n;
    let mae = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mean_actual = mean_f64(actual);
    let sst: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    // Constant target: perfect predictions score 0, everything else would be
    // -inf, which degrades to the 0.0 sentinel.
    let r2 = if sst < 1e-15 {
        0.0
    } else {
        1.0 - sse / sst
    };

    let directional_accuracy = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| non_negative_sign(**a) == non_negative_sign(**p))
        .count() as f64
        / n;

    // Hold sign(prediction) each day and realize that day's return.
    let strategy_returns: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| non_negative_sign(*p) * a)
        .collect();
    let strategy_sharpe = sharpe_ratio(&strategy_returns, risk_free_rate);

    Ok(RegressionMetrics {
        mse,
        rmse: mse.sqrt(),
        mae,
        r2,
        directional_accuracy,
        strategy_sharpe,
    })
}

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator). 0.0 below two observations.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
