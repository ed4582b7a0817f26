//! FeatureFrame — a date-indexed table of named f64 columns.
//!
//! Baselines receive a frame at prediction time but read only its index; the
//! columns exist for feature-driven models and diagnostics. Passing values
//! through the frame cannot leak test-period information into a baseline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{ReturnSeries, SeriesError};

/// A table whose row index matches a `ReturnSeries` index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl FeatureFrame {
    /// A frame with an index and no columns — sufficient for every baseline.
    pub fn from_index(dates: Vec<NaiveDate>) -> Result<Self, SeriesError> {
        // Reuse the series index validation.
        let probe = ReturnSeries::constant(dates, 0.0)?;
        Ok(Self {
            dates: probe.dates().to_vec(),
            columns: Vec::new(),
        })
    }

    /// Borrow the index of an existing series.
    pub fn from_series_index(series: &ReturnSeries) -> Self {
        Self {
            dates: series.dates().to_vec(),
            columns: Vec::new(),
        }
    }

    /// Add a named column. Fails if the column length does not match the index.
    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.len() != self.dates.len() {
            return Err(SeriesError::LengthMismatch {
                dates: self.dates.len(),
                values: values.len(),
            });
        }
        self.columns.push((name.to_string(), values));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Split at `position`: rows `[0, position)` and `[position, len)`.
    pub fn split_at(&self, position: usize) -> (FeatureFrame, FeatureFrame) {
        let pos = position.min(self.len());
        let head = FeatureFrame {
            dates: self.dates[..pos].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(n, v)| (n.clone(), v[..pos].to_vec()))
                .collect(),
        };
        let tail = FeatureFrame {
            dates: self.dates[pos..].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(n, v)| (n.clone(), v[pos..].to_vec()))
                .collect(),
        };
        (head, tail)
    }
}
