//! ReturnSeries — a date-indexed sequence of period returns.
//!
//! The index invariant (strictly increasing, no duplicate dates) is enforced
//! at construction. Every downstream consumer — transforms, baselines, the
//! metric engine — can therefore assume a well-ordered series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from series construction and alignment.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("index and values length mismatch: {dates} dates vs {values} values")]
    LengthMismatch { dates: usize, values: usize },

    #[error("index is not strictly increasing at position {position} ({date})")]
    UnsortedIndex { position: usize, date: NaiveDate },

    #[error("duplicate timestamp at position {position} ({date})")]
    DuplicateTimestamp { position: usize, date: NaiveDate },

    #[error("series is empty where at least one observation is required")]
    Empty,
}

/// An ordered, date-indexed sequence of f64 returns.
///
/// Values may be any finite float; the construction checks only the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Build a series from parallel date/value vectors.
    ///
    /// Fails if the lengths differ, the dates are not strictly increasing,
    /// or any date repeats.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[1] == pair[0] {
                return Err(SeriesError::DuplicateTimestamp {
                    position: i + 1,
                    date: pair[1],
                });
            }
            if pair[1] < pair[0] {
                return Err(SeriesError::UnsortedIndex {
                    position: i + 1,
                    date: pair[1],
                });
            }
        }
        Ok(Self { dates, values })
    }

    /// A constant series over the given index.
    pub fn constant(dates: Vec<NaiveDate>, value: f64) -> Result<Self, SeriesError> {
        let n = dates.len();
        Self::new(dates, vec![value; n])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Arithmetic mean. Returns 0.0 for an empty series.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Sample standard deviation (Bessel-corrected, n-1 denominator).
    ///
    /// Returns 0.0 for fewer than two observations. The n-1 convention
    /// matches pandas' `Series.std()` default, which the random baseline's
    /// fitted sigma depends on.
    pub fn std_dev(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (self.values.len() - 1) as f64;
        variance.sqrt()
    }

    /// True when both series share the same index, element for element.
    pub fn is_aligned_with(&self, other: &ReturnSeries) -> bool {
        self.dates == other.dates
    }

    /// Split at `position`: `[0, position)` and `[position, len)`.
    ///
    /// Index invariants are preserved by construction, so no re-validation.
    pub fn split_at(&self, position: usize) -> (ReturnSeries, ReturnSeries) {
        let pos = position.min(self.len());
        (
            ReturnSeries {
                dates: self.dates[..pos].to_vec(),
                values: self.values[..pos].to_vec(),
            },
            ReturnSeries {
                dates: self.dates[pos..].to_vec(),
                values: self.values[pos..].to_vec(),
            },
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
