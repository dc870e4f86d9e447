//! Classical seasonal-trend decomposition via centered moving averages.
//!
//! Decomposes a regular-frequency series into:
//! - Trend: one-year centered moving average (edge-truncated)
//! - Seasonal: mean detrended deviation per position within the year
//! - Deseasonalized: the input with the seasonal index removed
//!
//! The degradation estimate downstream is derived from the trend alone.

use crate::core::EnergyTimeSeries;
use crate::error::{DegradationError, Result};

/// Result of a classical decomposition.
#[derive(Debug, Clone)]
pub struct SeasonalDecomposition {
    /// Smoothed trend over the interior samples that survive edge truncation.
    pub trend: EnergyTimeSeries,
    /// Seasonal index: mean detrended deviation per position within the year.
    pub seasonal: Vec<f64>,
    /// Input series with the seasonal index subtracted, over the full index.
    pub deseasonalized: EnergyTimeSeries,
}

/// Centered moving average with edge truncation.
///
/// Even window lengths use a `window + 1`-point average with half weights
/// at both ends so the window stays centered on integer offsets; odd
/// lengths use the plain N-point average. The first and last `window / 2`
/// samples have no valid centered average and are excluded.
pub fn centered_moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window <= 1 {
        return Err(DegradationError::InvalidConfiguration(format!(
            "moving-average window must be greater than 1, got {}",
            window
        )));
    }

    let half = window / 2;
    let taps = 2 * half + 1;
    if values.len() < taps {
        return Err(DegradationError::InsufficientData {
            needed: taps,
            got: values.len(),
        });
    }

    let even = window % 2 == 0;
    let out_len = values.len() - 2 * half;
    let mut out = Vec::with_capacity(out_len);

    for center in half..values.len() - half {
        let mut sum = 0.0;
        for offset in 0..taps {
            let idx = center - half + offset;
            let weight = if even && (offset == 0 || offset == taps - 1) {
                0.5
            } else {
                1.0
            };
            sum += weight * values[idx];
        }
        out.push(sum / window as f64);
    }

    Ok(out)
}

/// Classical decomposer parameterized by samples per year.
#[derive(Debug, Clone)]
pub struct SeasonalDecomposer {
    period: usize,
}

impl SeasonalDecomposer {
    /// Create a decomposer for a series with `period` samples per year.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Samples per year this decomposer assumes.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Decompose the series into trend, seasonal index, and deseasonalized
    /// components.
    ///
    /// Needs at least one full centered window plus two surviving trend
    /// points.
    pub fn decompose(&self, series: &EnergyTimeSeries) -> Result<SeasonalDecomposition> {
        if self.period <= 1 {
            return Err(DegradationError::InvalidConfiguration(format!(
                "seasonal period must be greater than 1, got {}",
                self.period
            )));
        }

        let half = self.period / 2;
        let needed = 2 * half + 2;
        if series.len() < needed {
            return Err(DegradationError::InsufficientData {
                needed,
                got: series.len(),
            });
        }

        let values = series.values();
        let trend_values = centered_moving_average(values, self.period)?;
        let trend_timestamps = series.timestamps()[half..series.len() - half].to_vec();

        // Seasonal index: mean detrended residual per position within year,
        // aligned to the start of the series.
        let mut sums = vec![0.0; self.period];
        let mut counts = vec![0usize; self.period];
        for (j, trend) in trend_values.iter().enumerate() {
            let pos = (half + j) % self.period;
            sums[pos] += values[half + j] - trend;
            counts[pos] += 1;
        }
        let seasonal: Vec<f64> = sums
            .iter()
            .zip(counts.iter())
            .map(|(s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
            .collect();

        let deseasonalized_values: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, v)| v - seasonal[i % self.period])
            .collect();

        let trend = EnergyTimeSeries::new(trend_timestamps, trend_values)?;
        let deseasonalized =
            EnergyTimeSeries::new(series.timestamps().to_vec(), deseasonalized_values)?;

        Ok(SeasonalDecomposition {
            trend,
            seasonal,
            deseasonalized,
        })
    }
}
