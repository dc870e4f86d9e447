//! # pvdegrade
//!
//! Degradation-rate estimation for photovoltaic energy production assets.
//!
//! Given a time-stamped series of weather-corrected energy output, the
//! engine produces a single annualized percent-per-year figure (typically
//! negative) plus a bootstrap confidence interval. Three independent
//! estimators are provided:
//!
//! - OLS trend fitting over elapsed calendar years (any sampling frequency,
//!   including irregular)
//! - Classical seasonal-trend decomposition followed by a trend regression
//!   (monthly, weekly, daily)
//! - Year-on-year paired-ratio analysis aggregated by the median (monthly,
//!   weekly, daily, irregular daily)
//!
//! The input series is expected to be pre-filtered by upstream data-quality
//! checks; the engine validates statistical sufficiency only.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use pvdegrade::prelude::*;
//!
//! // Three years of monthly corrected energy with 0.5%/year decay.
//! let timestamps: Vec<_> = (0..37)
//!     .map(|m| {
//!         Utc.with_ymd_and_hms(2012 + (m / 12) as i32, 1 + (m % 12) as u32, 1, 0, 0, 0)
//!             .unwrap()
//!     })
//!     .collect();
//! let values: Vec<f64> = (0..37).map(|m| (1.0_f64 - 0.005 / 12.0).powi(m)).collect();
//! let series = EnergyTimeSeries::new(timestamps, values).unwrap();
//!
//! let result = degradation_ols(&series).unwrap();
//! assert!((result.rate_percent_per_year - (-0.5)).abs() < 0.1);
//! ```

pub mod analysis;
pub mod core;
pub mod error;
pub mod estimators;
pub mod seasonality;
pub mod utils;

pub use error::{DegradationError, Result};

pub mod prelude {
    pub use crate::analysis::{
        degradation_classical_decomposition, degradation_ols, degradation_year_on_year,
        DegradationAnalysis, DegradationConfig, DegradationResult, Method,
    };
    pub use crate::core::{EnergyTimeSeries, NonFinitePolicy, SamplingFrequency};
    pub use crate::error::{DegradationError, Result};
    pub use crate::estimators::{
        ClassicalDecompositionEstimator, DegradationEstimator, OlsEstimator, YoyEstimator,
    };
}
