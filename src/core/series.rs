//! EnergyTimeSeries data structure for weather-corrected energy output.

use crate::error::{DegradationError, Result};
use chrono::{DateTime, Utc};

/// Policy for handling non-finite values (NaN/Inf) before estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Silently drop observations with non-finite values.
    #[default]
    Drop,
    /// Return an error if non-finite values are found.
    Reject,
}

/// A time-stamped series of weather-corrected energy yield per interval.
///
/// Timestamps are strictly increasing with no duplicates; the series may
/// contain gaps. The engine treats a constructed series as read-only input.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl EnergyTimeSeries {
    /// Create a new series from parallel timestamp and value vectors.
    ///
    /// Timestamps must be strictly increasing and both vectors must have
    /// the same length.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(DegradationError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(DegradationError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(Self { timestamps, values })
    }

    /// Create a series from (timestamp, value) pairs.
    pub fn from_pairs(pairs: Vec<(DateTime<Utc>, f64)>) -> Result<Self> {
        let (timestamps, values) = pairs.into_iter().unzip();
        Self::new(timestamps, values)
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Extract a half-open index range of the series.
    pub fn slice(&self, start: usize, end: usize) -> Result<EnergyTimeSeries> {
        if start > end || end > self.len() {
            return Err(DegradationError::InvalidConfiguration(format!(
                "invalid slice range {}..{} for series of length {}",
                start,
                end,
                self.len()
            )));
        }

        Ok(EnergyTimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Return a copy with every value multiplied by a constant.
    pub fn scaled(&self, factor: f64) -> EnergyTimeSeries {
        EnergyTimeSeries {
            timestamps: self.timestamps.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Check if the series contains NaN or infinite values.
    pub fn has_non_finite(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Return a copy with non-finite observations removed.
    pub fn drop_non_finite(&self) -> EnergyTimeSeries {
        let (timestamps, values) = self
            .timestamps
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| (*t, *v))
            .unzip();

        EnergyTimeSeries { timestamps, values }
    }

    /// Apply a non-finite handling policy, returning a clean series.
    pub fn sanitized(&self, policy: NonFinitePolicy) -> Result<EnergyTimeSeries> {
        match policy {
            NonFinitePolicy::Reject => {
                if self.has_non_finite() {
                    return Err(DegradationError::NonFiniteInput);
                }
                Ok(self.clone())
            }
            NonFinitePolicy::Drop => Ok(self.drop_non_finite()),
        }
    }
}
