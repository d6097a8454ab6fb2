//! Recording Validator

use crate::error::ValidationError;
use sensor_log::{Channel, SensorReading};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Flag timestamps that move backwards
    pub require_monotonic_time: bool,
    /// Stop collecting after this many problems
    pub max_reported_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_monotonic_time: true,
            max_reported_errors: 32,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the recording can be windowed
    pub valid: bool,
    /// Problems found, fatal and non-fatal
    pub errors: Vec<ValidationError>,
    /// Number of rows validated
    pub rows_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(rows_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            rows_checked,
        }
    }

    /// Number of non-fatal warnings
    pub fn warning_count(&self) -> usize {
        self.errors.iter().filter(|e| !e.is_fatal()).count()
    }
}

/// Validator for cleaned accelerometer recordings
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check that a value is finite
    pub fn validate_finite(
        &self,
        field: &'static str,
        row: usize,
        value: f64,
    ) -> Result<(), ValidationError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::NonFinite { field, row, value })
        }
    }

    /// Check one reading against the one before it
    pub fn validate_reading(
        &self,
        row: usize,
        reading: &SensorReading,
        previous: Option<&SensorReading>,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.validate_finite("relative_time", row, reading.relative_time) {
            errors.push(e);
        }
        for channel in Channel::ALL {
            if let Err(e) = self.validate_finite(channel.column_name(), row, reading.channel(channel)) {
                errors.push(e);
            }
        }

        if self.config.require_monotonic_time {
            if let Some(prev) = previous {
                if reading.relative_time < prev.relative_time {
                    errors.push(ValidationError::NonMonotonicTime {
                        row,
                        previous: prev.relative_time,
                        current: reading.relative_time,
                    });
                }
            }
        }

        errors
    }

    /// Validate a whole recording
    pub fn validate(&self, readings: &[SensorReading]) -> ValidationResult {
        if readings.is_empty() {
            warn!("{}", ValidationError::Empty);
            return ValidationResult {
                valid: true,
                errors: vec![ValidationError::Empty],
                rows_checked: 0,
            };
        }

        let mut errors = Vec::new();
        let mut valid = true;

        for (row, reading) in readings.iter().enumerate() {
            let previous = row.checked_sub(1).map(|p| &readings[p]);
            for error in self.validate_reading(row, reading, previous) {
                if error.is_fatal() {
                    valid = false;
                } else {
                    warn!("{}", error);
                }
                if errors.len() < self.config.max_reported_errors {
                    errors.push(error);
                }
            }
        }

        if valid && errors.is_empty() {
            return ValidationResult::valid(readings.len());
        }

        ValidationResult {
            valid,
            errors,
            rows_checked: readings.len(),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
