//! Property-based tests for the degradation estimators.
//!
//! These verify invariants that should hold for all valid inputs, using
//! randomly generated decay rates and scale factors.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use pvdegrade::prelude::*;

fn month_start_timestamps(n: usize) -> Vec<DateTime<Utc>> {
    (0..n)
        .map(|m| {
            Utc.with_ymd_and_hms(2012 + (m / 12) as i32, 1 + (m % 12) as u32, 1, 0, 0, 0)
                .unwrap()
        })
        .collect()
}

fn monthly_decay(rd: f64, months: usize) -> EnergyTimeSeries {
    let values = (0..months)
        .map(|m| (1.0 + rd / 12.0).powi(m as i32))
        .collect();
    EnergyTimeSeries::new(month_start_timestamps(months), values).unwrap()
}

fn point_estimate(method: Method, series: &EnergyTimeSeries) -> Result<DegradationResult> {
    DegradationAnalysis::new(DegradationConfig::new(method).without_ci()).run(series)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rate_is_scale_invariant_for_every_method(
        rd in -0.02f64..-0.001,
        scale in 0.01f64..1.0e6,
    ) {
        let series = monthly_decay(rd, 37);
        let scaled = series.scaled(scale);

        for method in [Method::Ols, Method::ClassicalDecomposition, Method::YearOnYear] {
            let original = point_estimate(method, &series).unwrap().rate_percent_per_year;
            let rescaled = point_estimate(method, &scaled).unwrap().rate_percent_per_year;
            prop_assert!((original - rescaled).abs() < 1e-7);
        }
    }

    #[test]
    fn ols_recovers_generated_decay_rates(rd in -0.01f64..-0.001) {
        let series = monthly_decay(rd, 37);
        let result = point_estimate(Method::Ols, &series).unwrap();
        prop_assert!((result.rate_percent_per_year - 100.0 * rd).abs() < 0.1);
    }

    #[test]
    fn estimators_agree_within_tolerance(rd in -0.01f64..-0.001) {
        let series = monthly_decay(rd, 49);
        let ols = point_estimate(Method::Ols, &series).unwrap().rate_percent_per_year;
        let cd = point_estimate(Method::ClassicalDecomposition, &series)
            .unwrap()
            .rate_percent_per_year;
        let yoy = point_estimate(Method::YearOnYear, &series)
            .unwrap()
            .rate_percent_per_year;

        prop_assert!((ols - cd).abs() < 0.1);
        prop_assert!((ols - yoy).abs() < 0.1);
    }

    #[test]
    fn yoy_sample_size_never_exceeds_series_length(
        rd in -0.02f64..-0.001,
        months in 24usize..60,
    ) {
        let series = monthly_decay(rd, months);
        let result = point_estimate(Method::YearOnYear, &series).unwrap();
        prop_assert!(result.sample_size <= series.len());
        // Each of the first year's samples has no earlier counterpart.
        prop_assert_eq!(result.sample_size, series.len() - 12);
    }

    #[test]
    fn seeded_intervals_are_reproducible(seed in any::<u64>()) {
        let series = monthly_decay(-0.005, 37);
        let run = || {
            DegradationAnalysis::new(
                DegradationConfig::new(Method::YearOnYear)
                    .with_seed(seed)
                    .with_bootstrap_iterations(64),
            )
            .run(&series)
            .unwrap()
        };
        prop_assert_eq!(run().confidence_interval, run().confidence_interval);
    }
}
