//! Seasonal-trend decomposition.

mod classical;

pub use classical::{centered_moving_average, SeasonalDecomposer, SeasonalDecomposition};
