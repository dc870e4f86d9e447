//! Year-on-year estimator: median of paired one-year percent changes.

use crate::core::{one_year, EnergyTimeSeries, NonFinitePolicy, SamplingFrequency};
use crate::error::{DegradationError, Result};
use crate::estimators::{DegradationEstimator, Estimate, RatePopulation};
use crate::utils::median;
use chrono::{DateTime, Duration, Utc};

/// Maximum match gap for irregular series when no tolerance is configured.
const IRREGULAR_MAX_GAP_DAYS: i64 = 30;

/// One year-on-year observation: a point compared to its counterpart
/// approximately one year earlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoySample {
    /// Timestamp of the later point in the pair.
    pub timestamp: DateTime<Utc>,
    /// `100 · (value / value_one_year_earlier − 1)`.
    pub percent_change: f64,
}

/// Pairs every sample with the nearest sample one year earlier and
/// aggregates the percent changes by the median.
///
/// The median trades statistical efficiency for robustness to outliers
/// from transient anomalies (snow cover, curtailment) the upstream
/// filters did not fully remove. The one-year lookback is a calendar
/// quantity computed from elapsed time, so irregular daily series still
/// match correctly. Sub-daily frequencies are rejected: a one-year
/// lookback at that resolution is excessively noisy.
#[derive(Debug, Clone, Default)]
pub struct YoyEstimator {
    non_finite: NonFinitePolicy,
    match_tolerance: Option<Duration>,
}

impl YoyEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for non-finite values (drop by default).
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    /// Override the match tolerance. Defaults to half the nominal sampling
    /// gap for regular frequencies and 30 days for irregular series.
    pub fn with_match_tolerance(mut self, tolerance: Duration) -> Self {
        self.match_tolerance = Some(tolerance);
        self
    }

    fn tolerance_seconds(&self, frequency: SamplingFrequency) -> Result<i64> {
        if let Some(tolerance) = self.match_tolerance {
            let secs = tolerance.num_seconds();
            if secs <= 0 {
                return Err(DegradationError::InvalidConfiguration(format!(
                    "year-on-year match tolerance must be positive, got {} s",
                    secs
                )));
            }
            return Ok(secs);
        }

        Ok(match frequency.nominal_gap() {
            Some(gap) => gap.num_seconds() / 2,
            None => IRREGULAR_MAX_GAP_DAYS * 86_400,
        })
    }

    /// Collect the year-on-year sample population for a series.
    pub fn samples(
        &self,
        series: &EnergyTimeSeries,
        frequency: SamplingFrequency,
    ) -> Result<Vec<YoySample>> {
        if !self.supports(frequency) {
            return Err(DegradationError::UnsupportedFrequency {
                method: self.name(),
                frequency,
            });
        }

        let tolerance = self.tolerance_seconds(frequency)?;
        let clean = series.sanitized(self.non_finite)?;

        let secs: Vec<i64> = clean.timestamps().iter().map(|t| t.timestamp()).collect();
        let values = clean.values();
        let year = one_year().num_seconds();

        let mut samples = Vec::new();
        for i in 0..secs.len() {
            let target = secs[i] - year;
            let idx = secs.partition_point(|&s| s < target);

            // Nearest of the two neighbors around the insertion point.
            let mut best: Option<usize> = None;
            for candidate in [idx.checked_sub(1), Some(idx)].into_iter().flatten() {
                if candidate >= i {
                    continue;
                }
                let better = match best {
                    Some(current) => {
                        (secs[candidate] - target).abs() < (secs[current] - target).abs()
                    }
                    None => true,
                };
                if better {
                    best = Some(candidate);
                }
            }

            if let Some(j) = best {
                if (secs[j] - target).abs() <= tolerance {
                    let percent_change = 100.0 * (values[i] / values[j] - 1.0);
                    if percent_change.is_finite() {
                        samples.push(YoySample {
                            timestamp: clean.timestamps()[i],
                            percent_change,
                        });
                    }
                }
            }
        }

        Ok(samples)
    }
}

impl DegradationEstimator for YoyEstimator {
    fn estimate(
        &self,
        series: &EnergyTimeSeries,
        frequency: SamplingFrequency,
    ) -> Result<Estimate> {
        let samples = self.samples(series, frequency)?;
        if samples.is_empty() {
            return Err(DegradationError::InsufficientData { needed: 1, got: 0 });
        }

        let deltas: Vec<f64> = samples.iter().map(|s| s.percent_change).collect();
        let rate = median(&deltas);

        Ok(Estimate {
            rate,
            sample_size: deltas.len(),
            population: RatePopulation::YoyDeltas(deltas),
        })
    }

    fn supports(&self, frequency: SamplingFrequency) -> bool {
        matches!(
            frequency,
            SamplingFrequency::MonthStart
                | SamplingFrequency::MonthEnd
                | SamplingFrequency::Weekly
                | SamplingFrequency::Daily
                | SamplingFrequency::Irregular
        )
    }

    fn name(&self) -> &'static str {
        "year-on-year"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn daily_decay(rd: f64, days: usize) -> EnergyTimeSeries {
        let base = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
        let timestamps = (0..days).map(|d| base + Duration::days(d as i64)).collect();
        let values = (0..days)
            .map(|d| (1.0 + rd / 365.0).powi(d as i32))
            .collect();
        EnergyTimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn recovers_annual_decay_rate() {
        let series = daily_decay(-0.005, 1097);
        let estimate = YoyEstimator::new()
            .estimate(&series, SamplingFrequency::Daily)
            .unwrap();

        assert!((estimate.rate - (-0.5)).abs() < 0.1);
        // Every sample in years two and three has a counterpart.
        assert_eq!(estimate.sample_size, 1097 - 365);
    }

    #[test]
    fn median_shrugs_off_outlier_pairs() {
        let mut series = daily_decay(-0.005, 1097);
        let mut values = series.values().to_vec();
        // A handful of snow-covered days the upstream filters missed.
        for v in values.iter_mut().take(800).skip(790) {
            *v *= 0.2;
        }
        series = EnergyTimeSeries::new(series.timestamps().to_vec(), values).unwrap();

        let estimate = YoyEstimator::new()
            .estimate(&series, SamplingFrequency::Daily)
            .unwrap();
        assert!((estimate.rate - (-0.5)).abs() < 0.1);
    }

    #[test]
    fn rejects_sub_daily_frequencies() {
        let series = daily_decay(-0.005, 400);
        let estimator = YoyEstimator::new();

        for freq in [
            SamplingFrequency::Hourly,
            SamplingFrequency::Minute,
            SamplingFrequency::Second,
        ] {
            assert!(!estimator.supports(freq));
            assert!(matches!(
                estimator.estimate(&series, freq),
                Err(DegradationError::UnsupportedFrequency { .. })
            ));
        }
    }

    #[test]
    fn short_series_has_no_matched_pairs() {
        let series = daily_decay(-0.005, 100);
        assert!(matches!(
            YoyEstimator::new().estimate(&series, SamplingFrequency::Daily),
            Err(DegradationError::InsufficientData { needed: 1, got: 0 })
        ));
    }

    #[test]
    fn non_positive_tolerance_is_invalid() {
        let series = daily_decay(-0.005, 400);
        let result = YoyEstimator::new()
            .with_match_tolerance(Duration::seconds(0))
            .estimate(&series, SamplingFrequency::Daily);
        assert!(matches!(
            result,
            Err(DegradationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn tolerance_override_narrows_matching() {
        let series = daily_decay(-0.005, 1097);
        // A one-second tolerance cannot match the 0.25-day offset between
        // 365 days and the mean calendar year.
        let result = YoyEstimator::new()
            .with_match_tolerance(Duration::seconds(1))
            .estimate(&series, SamplingFrequency::Daily);
        assert!(matches!(
            result,
            Err(DegradationError::InsufficientData { .. })
        ));
    }

    #[test]
    fn samples_carry_reference_timestamps() {
        let series = daily_decay(-0.005, 731);
        let samples = YoyEstimator::new()
            .samples(&series, SamplingFrequency::Daily)
            .unwrap();

        assert!(!samples.is_empty());
        for sample in &samples {
            assert!(sample.timestamp >= *series.timestamps().first().unwrap());
            assert!(sample.percent_change.is_finite());
        }
    }
}
