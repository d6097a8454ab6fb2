//! Windowing configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default rows per window
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// Default rows shared between consecutive windows
pub const DEFAULT_OVERLAP: usize = 50;

/// Value emitted for statistics that are undefined on a window
/// (skewness, kurtosis and correlation of a constant channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneracyPolicy {
    /// Emit NaN
    #[default]
    Nan,
    /// Emit 0.0
    Zero,
}

impl DegeneracyPolicy {
    /// Sentinel value for an undefined statistic
    pub fn value(self) -> f64 {
        match self {
            DegeneracyPolicy::Nan => f64::NAN,
            DegeneracyPolicy::Zero => 0.0,
        }
    }
}

/// Sliding window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Rows per window
    pub window_size: usize,
    /// Rows shared with the previous window
    pub overlap: usize,
    /// Convention for undefined statistics
    pub degeneracy: DegeneracyPolicy,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            overlap: DEFAULT_OVERLAP,
            degeneracy: DegeneracyPolicy::default(),
        }
    }
}

impl WindowConfig {
    /// Create a validated configuration
    pub fn new(window_size: usize, overlap: usize) -> Result<Self, ConfigError> {
        let config = Self {
            window_size,
            overlap,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the degeneracy policy
    pub fn with_degeneracy(mut self, degeneracy: DegeneracyPolicy) -> Self {
        self.degeneracy = degeneracy;
        self
    }

    /// Reject configurations whose step would not advance
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.overlap >= self.window_size {
            return Err(ConfigError::OverlapTooLarge {
                overlap: self.overlap,
                window_size: self.window_size,
            });
        }
        Ok(())
    }

    /// Rows between consecutive window starts
    pub fn step(&self) -> usize {
        self.window_size - self.overlap
    }

    /// Number of full windows in a sequence of `len` rows
    pub fn window_count(&self, len: usize) -> usize {
        if len < self.window_size {
            0
        } else {
            (len - self.window_size) / self.step() + 1
        }
    }
}
