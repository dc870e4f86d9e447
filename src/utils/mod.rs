//! Numeric primitives shared by the estimators.

pub mod bootstrap;
pub mod fit;
pub mod stats;

pub use bootstrap::{bootstrap_ci, BootstrapConfig};
pub use fit::{fit_line, LineFit};
pub use stats::{mean, median, percentile, variance};
