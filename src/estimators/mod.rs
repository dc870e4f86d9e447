//! Degradation-rate estimators.
//!
//! Each estimator turns an [`EnergyTimeSeries`] into an annualized percent
//! rate plus the per-observation population its confidence interval is
//! resampled from. All rates share the percent-per-year convention
//! (negative = declining) so methods are directly comparable.

mod classical;
mod ols;
mod yoy;

pub use classical::ClassicalDecompositionEstimator;
pub use ols::OlsEstimator;
pub use yoy::{YoyEstimator, YoySample};

use crate::core::{EnergyTimeSeries, SamplingFrequency};
use crate::error::Result;

/// Population a bootstrap interval is drawn from.
#[derive(Debug, Clone)]
pub enum RatePopulation {
    /// Residual-perturbation draws around a fitted trend line: resampled
    /// residuals are added back onto the fitted values and the line refit.
    TrendResiduals {
        /// Elapsed years per observation.
        x: Vec<f64>,
        fitted: Vec<f64>,
        residuals: Vec<f64>,
    },
    /// Year-on-year percent changes, aggregated by the median.
    YoyDeltas(Vec<f64>),
}

/// A point estimate together with its resampling population.
#[derive(Debug, Clone)]
pub struct Estimate {
    /// Annualized degradation rate in percent per year.
    pub rate: f64,
    /// Number of observations (or matched pairs) the estimate is based on.
    pub sample_size: usize,
    pub population: RatePopulation,
}

/// Common interface for degradation estimators.
///
/// This trait is object-safe and can be used with `Box<dyn DegradationEstimator>`.
pub trait DegradationEstimator {
    /// Estimate the degradation rate of a series whose frequency has
    /// already been classified.
    fn estimate(
        &self,
        series: &EnergyTimeSeries,
        frequency: SamplingFrequency,
    ) -> Result<Estimate>;

    /// Whether the estimator is legal for the classified frequency.
    fn supports(&self, frequency: SamplingFrequency) -> bool;

    /// Get the estimator name.
    fn name(&self) -> &'static str;
}

/// Type alias for boxed estimator trait objects.
pub type BoxedEstimator = Box<dyn DegradationEstimator>;
