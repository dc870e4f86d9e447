//! Bootstrap resampling for empirical confidence intervals.
//!
//! Resamples a population of per-observation estimates with replacement and
//! reports percentile intervals of the recomputed statistic. The random
//! source is constructed per call from an optional seed so results are
//! reproducible and concurrent callers share no hidden state.

use crate::error::{DegradationError, Result};
use crate::utils::stats::percentile;
use rand::prelude::*;
use rand::SeedableRng;

/// Configuration for bootstrap interval estimation.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Number of bootstrap resamples to draw.
    pub n_samples: usize,
    /// Confidence level in (0, 1), e.g. 0.95 for a 95% interval.
    pub level: f64,
    /// Random seed for reproducibility (None for entropy).
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_samples: 512,
            level: 0.95,
            seed: None,
        }
    }
}

impl BootstrapConfig {
    /// Create a new bootstrap config with the specified number of resamples.
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            ..Default::default()
        }
    }

    /// Set the confidence level.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Set the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.n_samples == 0 {
            return Err(DegradationError::InvalidConfiguration(
                "bootstrap iteration count must be at least 1".to_string(),
            ));
        }
        if !(self.level > 0.0 && self.level < 1.0) {
            return Err(DegradationError::InvalidConfiguration(format!(
                "confidence level must be in (0, 1), got {}",
                self.level
            )));
        }
        Ok(())
    }

    /// Construct the RNG for one bootstrap run.
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Resample a slice with replacement.
pub(crate) fn resample_with_replacement(values: &[f64], rng: &mut impl Rng) -> Vec<f64> {
    let n = values.len();
    (0..n).map(|_| values[rng.gen_range(0..n)]).collect()
}

/// Percentile interval of a statistic over bootstrap resamples.
///
/// Draws `n_samples` resamples of `samples` with replacement, recomputes
/// `statistic` on each, and returns the central interval at the configured
/// confidence level.
pub fn bootstrap_ci<F>(samples: &[f64], statistic: F, config: &BootstrapConfig) -> Result<(f64, f64)>
where
    F: Fn(&[f64]) -> f64,
{
    config.validate()?;
    if samples.is_empty() {
        return Err(DegradationError::InsufficientData { needed: 1, got: 0 });
    }

    let mut rng = config.rng();
    let mut draws = Vec::with_capacity(config.n_samples);
    for _ in 0..config.n_samples {
        let resampled = resample_with_replacement(samples, &mut rng);
        let stat = statistic(&resampled);
        if stat.is_finite() {
            draws.push(stat);
        }
    }

    if draws.is_empty() {
        return Err(DegradationError::InsufficientData {
            needed: 1,
            got: 0,
        });
    }

    let alpha = (1.0 - config.level) / 2.0;
    Ok((percentile(&draws, alpha), percentile(&draws, 1.0 - alpha)))
}
