//! Accelerometer Sensor Log
//!
//! Record types for cycling accelerometer recordings and the CSV reader that
//! produces them.

mod error;
mod loader;

pub use error::LoadError;
pub use loader::{load_csv, read_csv, COLUMN_RELATIVE_TIME};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accelerometer channels, in canonical feature order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Linear acceleration magnitude
    LinearAcceleration,
    /// X-axis acceleration
    AccX,
    /// Y-axis acceleration
    AccY,
}

impl Channel {
    /// All channels in the order features are emitted
    pub const ALL: [Channel; 3] = [Channel::LinearAcceleration, Channel::AccX, Channel::AccY];

    /// Column name used in recordings and feature names
    pub fn column_name(self) -> &'static str {
        match self {
            Channel::LinearAcceleration => "LinearAccelerometerSensor",
            Channel::AccX => "AccX",
            Channel::AccY => "AccY",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Surface the bicycle was ridden over during a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Asphalt,
    Pavement,
    Dirt,
}

impl SurfaceType {
    /// All known surfaces
    pub const ALL: [SurfaceType; 3] = [SurfaceType::Asphalt, SurfaceType::Pavement, SurfaceType::Dirt];

    /// Class label written to the training table
    pub fn default_label(self) -> &'static str {
        match self {
            SurfaceType::Asphalt => "Rua/Asfalto",
            SurfaceType::Pavement => "Cimento Pavimentado",
            SurfaceType::Dirt => "Terra Batida",
        }
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}

/// One row of a recording as read from disk; any cell may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub relative_time: Option<f64>,
    pub linear_acceleration: Option<f64>,
    pub acc_x: Option<f64>,
    pub acc_y: Option<f64>,
}

impl RawReading {
    /// Value of a sensor channel
    pub fn channel(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::LinearAcceleration => self.linear_acceleration,
            Channel::AccX => self.acc_x,
            Channel::AccY => self.acc_y,
        }
    }

    /// Mutable access to a sensor channel
    pub fn channel_mut(&mut self, channel: Channel) -> &mut Option<f64> {
        match channel {
            Channel::LinearAcceleration => &mut self.linear_acceleration,
            Channel::AccX => &mut self.acc_x,
            Channel::AccY => &mut self.acc_y,
        }
    }

    /// True when every cell of the row is missing
    pub fn is_blank(&self) -> bool {
        self.relative_time.is_none()
            && self.linear_acceleration.is_none()
            && self.acc_x.is_none()
            && self.acc_y.is_none()
    }

    /// Convert into a complete reading, if no cell is missing
    pub fn complete(&self) -> Option<SensorReading> {
        Some(SensorReading {
            relative_time: self.relative_time?,
            linear_acceleration: self.linear_acceleration?,
            acc_x: self.acc_x?,
            acc_y: self.acc_y?,
        })
    }
}

/// A cleaned accelerometer reading with no missing values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Milliseconds since the start of the recording
    pub relative_time: f64,
    pub linear_acceleration: f64,
    pub acc_x: f64,
    pub acc_y: f64,
}

impl SensorReading {
    /// Value of a sensor channel
    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::LinearAcceleration => self.linear_acceleration,
            Channel::AccX => self.acc_x,
            Channel::AccY => self.acc_y,
        }
    }
}

/// Collect one channel from a slice of readings
pub fn channel_values(readings: &[SensorReading], channel: Channel) -> Vec<f64> {
    readings.iter().map(|r| r.channel(channel)).collect()
}

/// A cleaned recording tagged with its class label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub label: String,
    pub readings: Vec<SensorReading>,
}

impl LabeledSeries {
    pub fn new(label: impl Into<String>, readings: Vec<SensorReading>) -> Self {
        Self {
            label: label.into(),
            readings,
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Span between first and last timestamp (ms)
    pub fn duration_ms(&self) -> f64 {
        match (self.readings.first(), self.readings.last()) {
            (Some(first), Some(last)) => last.relative_time - first.relative_time,
            _ => 0.0,
        }
    }
}
