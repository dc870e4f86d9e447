//! Simple linear regression primitive shared by the trend estimators.

use crate::error::{DegradationError, Result};

/// Result of fitting `y ≈ intercept + slope · x` by least squares.
#[derive(Debug, Clone)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// In-sample predictions.
    pub fitted: Vec<f64>,
    /// `y - fitted`.
    pub residuals: Vec<f64>,
}

/// Fit a straight line through `(x, y)` pairs by ordinary least squares.
///
/// Requires at least two observations with distinct `x` values.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LineFit> {
    if x.len() != y.len() {
        return Err(DegradationError::DimensionMismatch {
            expected: x.len(),
            got: y.len(),
        });
    }

    let n = x.len();
    if n < 2 {
        return Err(DegradationError::InsufficientData { needed: 2, got: n });
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        ss_xx += dx * dx;
        ss_xy += dx * (yi - mean_y);
    }

    if ss_xx < f64::EPSILON {
        // All x identical: fewer than two distinct abscissae.
        return Err(DegradationError::InsufficientData { needed: 2, got: 1 });
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    let fitted: Vec<f64> = x.iter().map(|xi| intercept + slope * xi).collect();
    let residuals: Vec<f64> = y
        .iter()
        .zip(fitted.iter())
        .map(|(yi, fi)| yi - fi)
        .collect();

    Ok(LineFit {
        slope,
        intercept,
        fitted,
        residuals,
    })
}
