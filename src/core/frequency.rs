//! Sampling-frequency classification and the elapsed-years time base.
//!
//! The nominal sampling frequency is always re-derived from the series'
//! consecutive timestamp gaps, never supplied by the caller. Elapsed time
//! is measured in fractional calendar years so unevenly spaced series are
//! handled correctly.

use chrono::{DateTime, Datelike, Duration, Utc};
use std::fmt;

/// Seconds in one mean calendar year (365.25 days).
pub const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// Fraction of gaps the modal gap class must cover for a regular
/// classification.
const MODAL_GAP_THRESHOLD: f64 = 0.9;

/// Relative tolerance when matching a gap against a nominal period.
const GAP_TOLERANCE: f64 = 0.005;

/// One mean calendar year as a `chrono::Duration`.
pub fn one_year() -> Duration {
    Duration::seconds(SECONDS_PER_YEAR as i64)
}

/// Classification of the nominal spacing between consecutive timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingFrequency {
    /// Monthly samples anchored at the start of each month.
    MonthStart,
    /// Monthly samples anchored at the end of each month.
    MonthEnd,
    Weekly,
    Daily,
    Hourly,
    Minute,
    Second,
    /// Gaps vary too much for a fixed-frequency grid to be assumed.
    Irregular,
}

impl fmt::Display for SamplingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingFrequency::MonthStart => "month-start",
            SamplingFrequency::MonthEnd => "month-end",
            SamplingFrequency::Weekly => "weekly",
            SamplingFrequency::Daily => "daily",
            SamplingFrequency::Hourly => "hourly",
            SamplingFrequency::Minute => "minute",
            SamplingFrequency::Second => "second",
            SamplingFrequency::Irregular => "irregular",
        };
        write!(f, "{}", name)
    }
}

impl SamplingFrequency {
    /// Number of samples that make up one year, where the period divides
    /// the year evenly. `None` for sub-daily and irregular spacing.
    pub fn periods_per_year(&self) -> Option<usize> {
        match self {
            SamplingFrequency::MonthStart | SamplingFrequency::MonthEnd => Some(12),
            SamplingFrequency::Weekly => Some(52),
            SamplingFrequency::Daily => Some(365),
            _ => None,
        }
    }

    /// Nominal gap between consecutive samples. `None` for irregular.
    pub fn nominal_gap(&self) -> Option<Duration> {
        let secs = match self {
            SamplingFrequency::MonthStart | SamplingFrequency::MonthEnd => {
                (SECONDS_PER_YEAR / 12.0) as i64
            }
            SamplingFrequency::Weekly => 7 * 86_400,
            SamplingFrequency::Daily => 86_400,
            SamplingFrequency::Hourly => 3_600,
            SamplingFrequency::Minute => 60,
            SamplingFrequency::Second => 1,
            SamplingFrequency::Irregular => return None,
        };
        Some(Duration::seconds(secs))
    }

    /// Whether samples are spaced at sub-daily resolution.
    pub fn is_sub_daily(&self) -> bool {
        matches!(
            self,
            SamplingFrequency::Hourly | SamplingFrequency::Minute | SamplingFrequency::Second
        )
    }

    /// Classify the nominal sampling frequency of a timestamp sequence.
    ///
    /// Each consecutive gap is bucketed against the calendar periods
    /// (1 s, 60 s, 1 h, 1 d, 7 d, 28-31 d); if the modal bucket covers at
    /// least 90% of all gaps the series classifies accordingly, otherwise
    /// it is `Irregular`. Monthly series are split into month-start and
    /// month-end variants by inspecting the day of month.
    pub fn classify(timestamps: &[DateTime<Utc>]) -> SamplingFrequency {
        if timestamps.len() < 2 {
            return SamplingFrequency::Irregular;
        }

        let mut counts = [0usize; 6];
        let total = timestamps.len() - 1;

        for pair in timestamps.windows(2) {
            let gap = (pair[1] - pair[0]).num_seconds();
            if let Some(class) = gap_class(gap) {
                counts[class as usize] += 1;
            }
        }

        let (modal, modal_count) = counts
            .iter()
            .enumerate()
            .max_by_key(|(_, &count)| count)
            .map(|(class, &count)| (class, count))
            .unwrap_or((0, 0));

        if (modal_count as f64) < MODAL_GAP_THRESHOLD * total as f64 {
            return SamplingFrequency::Irregular;
        }

        match modal {
            0 => SamplingFrequency::Second,
            1 => SamplingFrequency::Minute,
            2 => SamplingFrequency::Hourly,
            3 => SamplingFrequency::Daily,
            4 => SamplingFrequency::Weekly,
            _ => monthly_variant(timestamps),
        }
    }
}

/// Gap buckets in ascending period order; discriminants index `counts`.
#[derive(Clone, Copy)]
enum GapClass {
    Second = 0,
    Minute = 1,
    Hourly = 2,
    Daily = 3,
    Weekly = 4,
    Monthly = 5,
}

fn gap_class(gap_seconds: i64) -> Option<GapClass> {
    let fixed = [
        (1, GapClass::Second),
        (60, GapClass::Minute),
        (3_600, GapClass::Hourly),
        (86_400, GapClass::Daily),
        (7 * 86_400, GapClass::Weekly),
    ];

    for (nominal, class) in fixed {
        let tolerance = (nominal as f64 * GAP_TOLERANCE) as i64;
        if (gap_seconds - nominal).abs() <= tolerance {
            return Some(class);
        }
    }

    // Calendar months span 28 to 31 days.
    if (28 * 86_400..=31 * 86_400).contains(&gap_seconds) {
        return Some(GapClass::Monthly);
    }

    None
}

fn monthly_variant(timestamps: &[DateTime<Utc>]) -> SamplingFrequency {
    let n = timestamps.len();
    let start_count = timestamps.iter().filter(|t| t.day() == 1).count();
    if start_count * 2 >= n {
        return SamplingFrequency::MonthStart;
    }

    let end_count = timestamps
        .iter()
        .filter(|t| (**t + Duration::days(1)).day() == 1)
        .count();
    if end_count * 2 >= n {
        return SamplingFrequency::MonthEnd;
    }

    SamplingFrequency::MonthStart
}

/// Convert timestamps to fractional years elapsed since the first sample,
/// using actual calendar duration rather than an assumed fixed step.
pub fn elapsed_years(timestamps: &[DateTime<Utc>]) -> Vec<f64> {
    let Some(origin) = timestamps.first() else {
        return vec![];
    };
    timestamps
        .iter()
        .map(|t| (*t - *origin).num_seconds() as f64 / SECONDS_PER_YEAR)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn stepped(n: usize, step: Duration) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + step * i as i32).collect()
    }

    fn month_starts(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| {
                let year = 2012 + (i / 12) as i32;
                let month = 1 + (i % 12) as u32;
                Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap()
            })
            .collect()
    }

    fn month_ends(n: usize) -> Vec<DateTime<Utc>> {
        month_starts(n + 1)
            .windows(2)
            .map(|pair| pair[1] - Duration::days(1))
            .collect()
    }

    #[test]
    fn classifies_fixed_step_grids() {
        let cases = [
            (Duration::seconds(1), SamplingFrequency::Second),
            (Duration::minutes(1), SamplingFrequency::Minute),
            (Duration::hours(1), SamplingFrequency::Hourly),
            (Duration::days(1), SamplingFrequency::Daily),
            (Duration::days(7), SamplingFrequency::Weekly),
        ];
        for (step, expected) in cases {
            assert_eq!(SamplingFrequency::classify(&stepped(40, step)), expected);
        }
    }

    #[test]
    fn classifies_monthly_variants() {
        assert_eq!(
            SamplingFrequency::classify(&month_starts(37)),
            SamplingFrequency::MonthStart
        );
        assert_eq!(
            SamplingFrequency::classify(&month_ends(37)),
            SamplingFrequency::MonthEnd
        );
    }

    #[test]
    fn classifies_gappy_daily_grid_as_irregular() {
        // Drop every fifth day: 1-day gaps cover only 75% of spacings.
        let timestamps: Vec<_> = stepped(100, Duration::days(1))
            .into_iter()
            .enumerate()
            .filter(|(i, _)| i % 5 != 0)
            .map(|(_, t)| t)
            .collect();
        assert_eq!(
            SamplingFrequency::classify(&timestamps),
            SamplingFrequency::Irregular
        );
    }

    #[test]
    fn short_series_is_irregular() {
        let base = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            SamplingFrequency::classify(&[base]),
            SamplingFrequency::Irregular
        );
        assert_eq!(SamplingFrequency::classify(&[]), SamplingFrequency::Irregular);
    }

    #[test]
    fn periods_per_year_restricted_to_yearly_divisible_frequencies() {
        assert_eq!(SamplingFrequency::MonthStart.periods_per_year(), Some(12));
        assert_eq!(SamplingFrequency::MonthEnd.periods_per_year(), Some(12));
        assert_eq!(SamplingFrequency::Weekly.periods_per_year(), Some(52));
        assert_eq!(SamplingFrequency::Daily.periods_per_year(), Some(365));
        assert_eq!(SamplingFrequency::Hourly.periods_per_year(), None);
        assert_eq!(SamplingFrequency::Irregular.periods_per_year(), None);
    }

    #[test]
    fn elapsed_years_uses_calendar_duration() {
        let timestamps = stepped(3, Duration::days(365));
        let years = elapsed_years(&timestamps);
        assert_relative_eq!(years[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(years[1], 365.0 / 365.25, epsilon = 1e-9);
        assert_relative_eq!(years[2], 730.0 / 365.25, epsilon = 1e-9);

        assert!(elapsed_years(&[]).is_empty());
    }

    #[test]
    fn sub_daily_predicate() {
        assert!(SamplingFrequency::Hourly.is_sub_daily());
        assert!(SamplingFrequency::Second.is_sub_daily());
        assert!(!SamplingFrequency::Daily.is_sub_daily());
        assert!(!SamplingFrequency::Irregular.is_sub_daily());
    }
}
