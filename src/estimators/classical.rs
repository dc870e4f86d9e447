//! Classical-decomposition estimator: OLS over the extracted trend.

use crate::core::{elapsed_years, EnergyTimeSeries, NonFinitePolicy, SamplingFrequency};
use crate::error::{DegradationError, Result};
use crate::estimators::{DegradationEstimator, Estimate, RatePopulation};
use crate::seasonality::SeasonalDecomposer;
use crate::utils::fit_line;

/// Removes the seasonal cycle with a one-year centered moving average and
/// fits the surviving trend component by OLS over elapsed years.
///
/// The window scales with samples per year, so only frequencies whose
/// period divides the year in an integer number of samples are legal
/// (month-start, month-end, weekly, daily). Edge truncation costs
/// `window / 2` samples at each end, which is why this estimator needs
/// nominally two years of input where OLS needs two points.
#[derive(Debug, Clone, Default)]
pub struct ClassicalDecompositionEstimator {
    non_finite: NonFinitePolicy,
}

impl ClassicalDecompositionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for non-finite values (drop by default).
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }
}

impl DegradationEstimator for ClassicalDecompositionEstimator {
    fn estimate(
        &self,
        series: &EnergyTimeSeries,
        frequency: SamplingFrequency,
    ) -> Result<Estimate> {
        let period = frequency.periods_per_year().ok_or(
            DegradationError::UnsupportedFrequency {
                method: self.name(),
                frequency,
            },
        )?;

        let clean = series.sanitized(self.non_finite)?;
        let decomposition = SeasonalDecomposer::new(period).decompose(&clean)?;
        let trend = &decomposition.trend;

        let x = elapsed_years(trend.timestamps());
        let fit = fit_line(&x, trend.values())?;
        let rate = 100.0 * fit.slope / fit.intercept;

        Ok(Estimate {
            rate,
            sample_size: trend.len(),
            population: RatePopulation::TrendResiduals {
                x,
                fitted: fit.fitted,
                residuals: fit.residuals,
            },
        })
    }

    fn supports(&self, frequency: SamplingFrequency) -> bool {
        frequency.periods_per_year().is_some()
    }

    fn name(&self) -> &'static str {
        "classical decomposition"
    }
}
