use serde::{Deserialize, Serialize};

use super::error::{FrameError, FrameResult, check_index};
use crate::values::Timestamp;

/// Dense scalar series indexed by strictly increasing timestamps
///
/// Spreads and smoother outputs are carried as `TimeSeries`. Missing values
/// never appear here; they are dropped before a series is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    index: Vec<Timestamp>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series, validating ordering and lengths
    pub fn new(index: Vec<Timestamp>, values: Vec<f64>) -> FrameResult<Self> {
        if index.len() != values.len() {
            return Err(FrameError::LengthMismatch {
                column: "values".to_string(),
                expected: index.len(),
                actual: values.len(),
            });
        }
        check_index(&index)?;
        Ok(Self { index, values })
    }

    /// An empty series
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[Timestamp] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(timestamp, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, f64)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at an exact timestamp
    pub fn get(&self, at: Timestamp) -> Option<f64> {
        self.index
            .binary_search(&at)
            .ok()
            .map(|position| self.values[position])
    }

    /// Drop the points whose value is NaN or infinite
    pub fn finite(&self) -> Self {
        let (index, values) = self.iter().filter(|(_, v)| v.is_finite()).unzip();
        Self { index, values }
    }

    /// Same index, new values (used by smoothers which never reshape the index)
    pub fn with_values(&self, values: Vec<f64>) -> FrameResult<Self> {
        Self::new(self.index.clone(), values)
    }

    /// Element-wise combination of two series sharing the same index
    pub fn zip_with(&self, other: &TimeSeries, f: impl Fn(f64, f64) -> f64) -> FrameResult<Self> {
        if self.index != other.index {
            return Err(FrameError::LengthMismatch {
                column: "other".to_string(),
                expected: self.len(),
                actual: other.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| f(*a, *b))
            .collect();
        Ok(Self {
            index: self.index.clone(),
            values,
        })
    }
}
