//! OLS trend estimator: a straight-line fit over elapsed years.

use crate::core::{elapsed_years, EnergyTimeSeries, NonFinitePolicy, SamplingFrequency};
use crate::error::{DegradationError, Result};
use crate::estimators::{DegradationEstimator, Estimate, RatePopulation};
use crate::utils::fit_line;

/// Fits `value(t) ≈ a + b·t` with t in elapsed years and reports the rate
/// as `100·b/a`, percent per year relative to the fitted intercept.
///
/// Exact elapsed time, not sample index, is the independent variable, so
/// the fit stays correct under irregular sampling; this is the only
/// estimator with no frequency restriction. The rate convention assumes
/// the series is normalized so that early values approximate year-zero
/// output.
#[derive(Debug, Clone, Default)]
pub struct OlsEstimator {
    non_finite: NonFinitePolicy,
}

impl OlsEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for non-finite values (drop by default).
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }
}

impl DegradationEstimator for OlsEstimator {
    fn estimate(
        &self,
        series: &EnergyTimeSeries,
        _frequency: SamplingFrequency,
    ) -> Result<Estimate> {
        let clean = series.sanitized(self.non_finite)?;
        if clean.len() < 2 {
            return Err(DegradationError::InsufficientData {
                needed: 2,
                got: clean.len(),
            });
        }

        let x = elapsed_years(clean.timestamps());
        let fit = fit_line(&x, clean.values())?;
        let rate = 100.0 * fit.slope / fit.intercept;

        Ok(Estimate {
            rate,
            sample_size: clean.len(),
            population: RatePopulation::TrendResiduals {
                x,
                fitted: fit.fitted,
                residuals: fit.residuals,
            },
        })
    }

    fn supports(&self, _frequency: SamplingFrequency) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "ols"
    }
}
