//! Core data structures: the energy time series and its time base.

mod frequency;
mod series;

pub use frequency::{elapsed_years, one_year, SamplingFrequency, SECONDS_PER_YEAR};
pub use series::{EnergyTimeSeries, NonFinitePolicy};
