//! Augmented Dickey-Fuller stationarity test.
//!
//! Fits the ADF regression with a constant and `lags` lagged differences:
//!
//!   Δy_t = α + β·y_{t-1} + Σ γ_i·Δy_{t-i} + ε_t
//!
//! and reports the t-statistic on β against the MacKinnon constant-only
//! asymptotic critical values. The verdict is a 5%-level hypothesis test
//! (H0: unit root / non-stationary); no p-value surface interpolation.
//!
//! NaN observations are dropped before regression, matching the reference
//! workflow of testing a price or return series straight from ingestion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MacKinnon asymptotic critical values, constant-only regression.
pub const ADF_CRIT_1PCT: f64 = -3.43;
pub const ADF_CRIT_5PCT: f64 = -2.86;
pub const ADF_CRIT_10PCT: f64 = -2.57;

/// Errors from the ADF test.
#[derive(Debug, Error)]
pub enum StationarityError {
    #[error("too few observations for ADF with {lags} lags: {n_obs} usable rows")]
    TooFewObservations { n_obs: usize, lags: usize },

    #[error("series is numerically degenerate (zero variance), ADF undefined")]
    DegenerateSeries,
}

/// Result of an Augmented Dickey-Fuller test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdfReport {
    /// Label for the tested series (e.g., "Close", "Log_Returns").
    pub name: String,
    /// The ADF t-statistic on the lagged-level coefficient.
    pub statistic: f64,
    /// Number of lagged difference terms included.
    pub lags: usize,
    /// Usable observations after lagging and differencing.
    pub n_obs: usize,
    pub critical_1pct: f64,
    pub critical_5pct: f64,
    pub critical_10pct: f64,
    /// Rejects the unit-root null at the 5% level.
    pub is_stationary: bool,
}

impl AdfReport {
    /// One-line verdict for reports.
    pub fn verdict(&self) -> &'static str {
        if self.is_stationary {
            "Stationary (reject H0)"
        } else {
            "Non-Stationary (fail to reject H0)"
        }
    }
}

/// Run the ADF test on a series with the given number of lagged differences.
///
/// `lags = 0` is the plain Dickey-Fuller test and is the usual choice for
/// daily log-returns.
pub fn adf_test(name: &str, series: &[f64], lags: usize) -> Result<AdfReport, StationarityError> {
    let y: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();

    // Regressors: constant + lagged level + `lags` lagged differences.
    let k = 2 + lags;
    // Effective sample: observations lost to differencing and lagging,
    // plus enough residual degrees of freedom for the variance estimate.
    let first = lags + 1;
    if y.len() < first + k + 2 {
        return Err(StationarityError::TooFewObservations {
            n_obs: y.len().saturating_sub(first),
            lags,
        });
    }

    let n = y.len() - first;
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);
    let mut target: Vec<f64> = Vec::with_capacity(n);

    for t in first..y.len() {
        let mut row = Vec::with_capacity(k);
        row.push(1.0); // constant
        row.push(y[t - 1]); // lagged level
        for i in 1..=lags {
            row.push(y[t - i] - y[t - i - 1]); // lagged differences
        }
        rows.push(row);
        target.push(y[t] - y[t - 1]);
    }

    let fit = ols(&rows, &target).ok_or(StationarityError::DegenerateSeries)?;

    // t-statistic on the lagged-level coefficient (column 1)
    let beta = fit.coefficients[1];
    let se = fit.std_errors[1];
    if !(se > 0.0) {
        return Err(StationarityError::DegenerateSeries);
    }
    let statistic = beta / se;

    Ok(AdfReport {
        name: name.to_string(),
        statistic,
        lags,
        n_obs: n,
        critical_1pct: ADF_CRIT_1PCT,
        critical_5pct: ADF_CRIT_5PCT,
        critical_10pct: ADF_CRIT_10PCT,
        is_stationary: statistic < ADF_CRIT_5PCT,
    })
}

struct OlsFit {
    coefficients: Vec<f64>,
    std_errors: Vec<f64>,
}

/// Ordinary least squares via normal equations with Gauss-Jordan inversion.
///
/// Returns None when X'X is singular (collinear or constant regressors).
fn ols(rows: &[Vec<f64>], target: &[f64]) -> Option<OlsFit> {
    let n = rows.len();
    let k = rows[0].len();
    if n <= k {
        return None;
    }

    // X'X and X'y
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &y) in rows.iter().zip(target) {
        for i in 0..k {
            xty[i] += row[i] * y;
            for j in 0..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }

    let inv = invert(&xtx)?;

    let coefficients: Vec<f64> = (0..k)
        .map(|i| (0..k).map(|j| inv[i][j] * xty[j]).sum())
        .collect();

    // Residual variance s^2 = SSE / (n - k)
    let sse: f64 = rows
        .iter()
        .zip(target)
        .map(|(row, &y)| {
            let fitted: f64 = row.iter().zip(&coefficients).map(|(x, c)| x * c).sum();
            (y - fitted).powi(2)
        })
        .sum();
    let s2 = sse / (n - k) as f64;

    let std_errors: Vec<f64> = (0..k).map(|i| (s2 * inv[i][i]).sqrt()).collect();

    Some(OlsFit {
        coefficients,
        std_errors,
    })
}

/// Gauss-Jordan matrix inversion with partial pivoting.
fn invert(matrix: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let k = matrix.len();
    let mut aug: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.clone();
            r.extend((0..k).map(|j| if i == j { 1.0 } else { 0.0 }));
            r
        })
        .collect();

    for col in 0..k {
        // Partial pivot
        let pivot_row = (col..k).max_by(|&a, &b| {
            aug[a][col]
                .abs()
                .partial_cmp(&aug[b][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if aug[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        aug.swap(col, pivot_row);

        let pivot = aug[col][col];
        for v in aug[col].iter_mut() {
            *v /= pivot;
        }

        let pivot_vals = aug[col].clone();
        for row in 0..k {
            if row == col {
                continue;
            }
            let factor = aug[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * k {
                aug[row][j] -= factor * pivot_vals[j];
            }
        }
    }

    Some(aug.into_iter().map(|row| row[k..].to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn white_noise(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(-0.01..0.01)).collect()
    }

    fn random_walk(n: usize, seed: u64) -> Vec<f64> {
        let noise = white_noise(n, seed);
        let mut level = 100.0;
        noise
            .into_iter()
            .map(|e| {
                level += e;
                level
            })
            .collect()
    }

    #[test]
    fn white_noise_is_stationary() {
        let report = adf_test("returns", &white_noise(500, 42), 0).unwrap();
        assert!(
            report.is_stationary,
            "white noise should reject the unit root, statistic = {}",
            report.statistic
        );
        assert!(report.statistic < ADF_CRIT_5PCT);
    }

    #[test]
    fn random_walk_is_not_stationary() {
        let report = adf_test("price", &random_walk(500, 42), 0).unwrap();
        assert!(
            !report.is_stationary,
            "a random walk should not reject the unit root, statistic = {}",
            report.statistic
        );
    }

    #[test]
    fn differenced_walk_becomes_stationary() {
        let walk = random_walk(500, 7);
        let diff: Vec<f64> = walk.windows(2).map(|w| w[1] - w[0]).collect();
        let level = adf_test("level", &walk, 1).unwrap();
        let differenced = adf_test("diff", &diff, 1).unwrap();
        assert!(!level.is_stationary);
        assert!(differenced.is_stationary);
    }

    #[test]
    fn lags_reduce_usable_observations() {
        let data = white_noise(100, 1);
        let r0 = adf_test("x", &data, 0).unwrap();
        let r2 = adf_test("x", &data, 2).unwrap();
        assert_eq!(r0.n_obs, 99);
        assert_eq!(r2.n_obs, 97);
    }

    #[test]
    fn nan_observations_are_dropped() {
        let mut data = white_noise(300, 3);
        data[0] = f64::NAN; // leading NaN, as produced by a return transform
        let report = adf_test("returns", &data, 0).unwrap();
        assert_eq!(report.n_obs, 298);
    }

    #[test]
    fn too_short_series_fails() {
        assert!(matches!(
            adf_test("x", &[1.0, 2.0, 3.0], 0),
            Err(StationarityError::TooFewObservations { .. })
        ));
    }

    #[test]
    fn constant_series_is_degenerate() {
        let data = vec![1.0; 100];
        assert!(matches!(
            adf_test("x", &data, 0),
            Err(StationarityError::DegenerateSeries)
        ));
    }

    #[test]
    fn verdict_strings() {
        let mut report = adf_test("x", &white_noise(200, 5), 0).unwrap();
        assert_eq!(report.verdict(), "Stationary (reject H0)");
        report.is_stationary = false;
        assert_eq!(report.verdict(), "Non-Stationary (fail to reject H0)");
    }
}
