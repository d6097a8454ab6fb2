//! Validation Error Types

use thiserror::Error;

/// Problems found while validating a recording
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Reading is NaN or infinite
    #[error("{field} at row {row} is not finite: {value}")]
    NonFinite {
        field: &'static str,
        row: usize,
        value: f64,
    },

    /// Timestamp moved backwards
    #[error("relative_time decreases at row {row}: {previous} -> {current}")]
    NonMonotonicTime {
        row: usize,
        previous: f64,
        current: f64,
    },

    /// Recording has no usable rows; it yields no windows
    #[error("Recording contains no complete rows")]
    Empty,
}

impl ValidationError {
    /// Whether the problem makes the recording unusable
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ValidationError::NonMonotonicTime { .. } | ValidationError::Empty
        )
    }
}
