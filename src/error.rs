//! Error types for the pvdegrade library.

use crate::core::SamplingFrequency;
use thiserror::Error;

/// Result type alias for degradation analysis operations.
pub type Result<T> = std::result::Result<T, DegradationError>;

/// Errors that can occur during degradation analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegradationError {
    /// Fewer data points survive preprocessing than the method requires.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The classified sampling frequency is not legal for the requested method.
    #[error("{method} does not support {frequency} sampling")]
    UnsupportedFrequency {
        method: &'static str,
        frequency: SamplingFrequency,
    },

    /// A window or tolerance parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The series contains non-finite values and the configured policy is reject.
    #[error("series contains non-finite values")]
    NonFiniteInput,

    /// Timestamp-related error during series construction.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Dimension mismatch between timestamps and values.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = DegradationError::InsufficientData { needed: 2, got: 1 };
        assert_eq!(err.to_string(), "insufficient data: need at least 2, got 1");

        let err = DegradationError::UnsupportedFrequency {
            method: "year-on-year",
            frequency: SamplingFrequency::Hourly,
        };
        assert_eq!(err.to_string(), "year-on-year does not support hourly sampling");

        let err = DegradationError::InvalidConfiguration("window must be > 1".to_string());
        assert_eq!(err.to_string(), "invalid configuration: window must be > 1");

        let err = DegradationError::NonFiniteInput;
        assert_eq!(err.to_string(), "series contains non-finite values");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = DegradationError::NonFiniteInput;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
