//! Degradation analysis facade: validation, dispatch, and result packaging.
//!
//! A run validates the configuration and frequency legality before any
//! computation begins, so a misconfigured call fails fast rather than
//! partway through a long decomposition. Dispatch then selects the
//! estimator for the requested method, and the compute step pairs its
//! point estimate with a bootstrap confidence interval.

use crate::core::{EnergyTimeSeries, NonFinitePolicy, SamplingFrequency};
use crate::error::{DegradationError, Result};
use crate::estimators::{
    BoxedEstimator, ClassicalDecompositionEstimator, Estimate, OlsEstimator, RatePopulation,
    YoyEstimator,
};
use crate::utils::bootstrap::{bootstrap_ci, resample_with_replacement, BootstrapConfig};
use crate::utils::{fit_line, median, percentile};
use chrono::Duration;
use std::fmt;

/// Degradation estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Ols,
    ClassicalDecomposition,
    YearOnYear,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Ols => "ols",
            Method::ClassicalDecomposition => "classical decomposition",
            Method::YearOnYear => "year-on-year",
        };
        write!(f, "{}", name)
    }
}

/// Per-call configuration for a degradation analysis.
#[derive(Debug, Clone)]
pub struct DegradationConfig {
    pub method: Method,
    /// Confidence level in (0, 1) for the bootstrap interval.
    pub confidence_level: f64,
    /// Number of bootstrap resamples; the dominant cost driver.
    pub bootstrap_iterations: usize,
    /// Seed for reproducible intervals (None for entropy).
    pub random_seed: Option<u64>,
    /// Override for the year-on-year match tolerance.
    pub yoy_match_tolerance: Option<Duration>,
    /// Policy for non-finite values in the input series.
    pub non_finite: NonFinitePolicy,
    /// Skip the bootstrap step and report only the point estimate.
    pub compute_ci: bool,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        Self {
            method: Method::Ols,
            confidence_level: 0.95,
            bootstrap_iterations: 512,
            random_seed: None,
            yoy_match_tolerance: None,
            non_finite: NonFinitePolicy::Drop,
            compute_ci: true,
        }
    }
}

impl DegradationConfig {
    /// Create a config for the given method with default parameters.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_bootstrap_iterations(mut self, iterations: usize) -> Self {
        self.bootstrap_iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_yoy_match_tolerance(mut self, tolerance: Duration) -> Self {
        self.yoy_match_tolerance = Some(tolerance);
        self
    }

    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    /// Report only the point estimate, skipping the bootstrap.
    pub fn without_ci(mut self) -> Self {
        self.compute_ci = false;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(DegradationError::InvalidConfiguration(format!(
                "confidence level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        if self.bootstrap_iterations == 0 {
            return Err(DegradationError::InvalidConfiguration(
                "bootstrap iteration count must be at least 1".to_string(),
            ));
        }
        if let Some(tolerance) = self.yoy_match_tolerance {
            if tolerance.num_seconds() <= 0 {
                return Err(DegradationError::InvalidConfiguration(
                    "year-on-year match tolerance must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of a degradation analysis. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradationResult {
    /// Annualized rate in percent per year; negative means declining.
    pub rate_percent_per_year: f64,
    /// Bootstrap percentile interval, when requested.
    pub confidence_interval: Option<(f64, f64)>,
    pub method: Method,
    /// Observations (or matched pairs) the estimate is based on.
    pub sample_size: usize,
    /// Frequency classified from the input series.
    pub frequency: SamplingFrequency,
}

/// Runs the validate → dispatch → compute pipeline for one series.
#[derive(Debug, Clone, Default)]
pub struct DegradationAnalysis {
    config: DegradationConfig,
}

impl DegradationAnalysis {
    pub fn new(config: DegradationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DegradationConfig {
        &self.config
    }

    /// Estimate the degradation rate of one series.
    pub fn run(&self, series: &EnergyTimeSeries) -> Result<DegradationResult> {
        self.config.validate()?;

        let frequency = SamplingFrequency::classify(series.timestamps());
        let estimator = self.build_estimator();
        if !estimator.supports(frequency) {
            return Err(DegradationError::UnsupportedFrequency {
                method: estimator.name(),
                frequency,
            });
        }

        let estimate = estimator.estimate(series, frequency)?;
        let confidence_interval = if self.config.compute_ci {
            Some(self.interval(&estimate)?)
        } else {
            None
        };

        Ok(DegradationResult {
            rate_percent_per_year: estimate.rate,
            confidence_interval,
            method: self.config.method,
            sample_size: estimate.sample_size,
            frequency,
        })
    }

    fn build_estimator(&self) -> BoxedEstimator {
        match self.config.method {
            Method::Ols => Box::new(OlsEstimator::new().with_non_finite(self.config.non_finite)),
            Method::ClassicalDecomposition => Box::new(
                ClassicalDecompositionEstimator::new().with_non_finite(self.config.non_finite),
            ),
            Method::YearOnYear => {
                let mut estimator = YoyEstimator::new().with_non_finite(self.config.non_finite);
                if let Some(tolerance) = self.config.yoy_match_tolerance {
                    estimator = estimator.with_match_tolerance(tolerance);
                }
                Box::new(estimator)
            }
        }
    }

    fn bootstrap_config(&self) -> BootstrapConfig {
        BootstrapConfig {
            n_samples: self.config.bootstrap_iterations,
            level: self.config.confidence_level,
            seed: self.config.random_seed,
        }
    }

    fn interval(&self, estimate: &Estimate) -> Result<(f64, f64)> {
        let config = self.bootstrap_config();
        match &estimate.population {
            RatePopulation::YoyDeltas(deltas) => bootstrap_ci(deltas, median, &config),
            RatePopulation::TrendResiduals {
                x,
                fitted,
                residuals,
            } => {
                config.validate()?;
                let mut rng = config.rng();
                let mut draws = Vec::with_capacity(config.n_samples);

                for _ in 0..config.n_samples {
                    let resampled = resample_with_replacement(residuals, &mut rng);
                    let perturbed: Vec<f64> = fitted
                        .iter()
                        .zip(resampled.iter())
                        .map(|(f, r)| f + r)
                        .collect();
                    let fit = fit_line(x, &perturbed)?;
                    let rate = 100.0 * fit.slope / fit.intercept;
                    if rate.is_finite() {
                        draws.push(rate);
                    }
                }

                if draws.is_empty() {
                    return Err(DegradationError::InsufficientData { needed: 1, got: 0 });
                }

                let alpha = (1.0 - config.level) / 2.0;
                Ok((percentile(&draws, alpha), percentile(&draws, 1.0 - alpha)))
            }
        }
    }
}

/// Estimate degradation by OLS trend fitting with default configuration.
pub fn degradation_ols(series: &EnergyTimeSeries) -> Result<DegradationResult> {
    DegradationAnalysis::new(DegradationConfig::new(Method::Ols)).run(series)
}

/// Estimate degradation by classical decomposition with default
/// configuration.
pub fn degradation_classical_decomposition(
    series: &EnergyTimeSeries,
) -> Result<DegradationResult> {
    DegradationAnalysis::new(DegradationConfig::new(Method::ClassicalDecomposition)).run(series)
}

/// Estimate degradation by year-on-year analysis with default
/// configuration.
pub fn degradation_year_on_year(series: &EnergyTimeSeries) -> Result<DegradationResult> {
    DegradationAnalysis::new(DegradationConfig::new(Method::YearOnYear)).run(series)
}
