//! Feature Vector Assembly

use crate::config::WindowConfig;
use crate::error::FeatureError;
use crate::fft::SpectrumAnalyzer;
use crate::statistics::{pearson_correlation, TimeDomainFeatures};
use crate::window::Windows;
use sensor_log::{channel_values, Channel, LabeledSeries, SensorReading};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Features computed per channel
pub const FEATURES_PER_CHANNEL: usize = 20;

/// Features computed once per window across channels
pub const CROSS_CHANNEL_FEATURES: usize = 2;

/// Number of numeric features in a vector
pub const FEATURE_DIMENSION: usize = Channel::ALL.len() * FEATURES_PER_CHANNEL + CROSS_CHANNEL_FEATURES;

/// Per-channel statistic, in emitted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelStat {
    Mean,
    Std,
    Var,
    Min,
    Max,
    Range,
    Median,
    Q25,
    Q75,
    Iqr,
    Skewness,
    Kurtosis,
    Rms,
    Energy,
    FftMean,
    FftStd,
    FftMax,
    DominantFreq,
    PsdMean,
    PsdMax,
}

impl ChannelStat {
    pub const ALL: [ChannelStat; FEATURES_PER_CHANNEL] = [
        ChannelStat::Mean,
        ChannelStat::Std,
        ChannelStat::Var,
        ChannelStat::Min,
        ChannelStat::Max,
        ChannelStat::Range,
        ChannelStat::Median,
        ChannelStat::Q25,
        ChannelStat::Q75,
        ChannelStat::Iqr,
        ChannelStat::Skewness,
        ChannelStat::Kurtosis,
        ChannelStat::Rms,
        ChannelStat::Energy,
        ChannelStat::FftMean,
        ChannelStat::FftStd,
        ChannelStat::FftMax,
        ChannelStat::DominantFreq,
        ChannelStat::PsdMean,
        ChannelStat::PsdMax,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            ChannelStat::Mean => "mean",
            ChannelStat::Std => "std",
            ChannelStat::Var => "var",
            ChannelStat::Min => "min",
            ChannelStat::Max => "max",
            ChannelStat::Range => "range",
            ChannelStat::Median => "median",
            ChannelStat::Q25 => "q25",
            ChannelStat::Q75 => "q75",
            ChannelStat::Iqr => "iqr",
            ChannelStat::Skewness => "skewness",
            ChannelStat::Kurtosis => "kurtosis",
            ChannelStat::Rms => "rms",
            ChannelStat::Energy => "energy",
            ChannelStat::FftMean => "fft_mean",
            ChannelStat::FftStd => "fft_std",
            ChannelStat::FftMax => "fft_max",
            ChannelStat::DominantFreq => "dominant_freq",
            ChannelStat::PsdMean => "psd_mean",
            ChannelStat::PsdMax => "psd_max",
        }
    }

    /// Position of a channel statistic in the feature vector
    pub fn index(self, channel: Channel) -> usize {
        let channel_pos = Channel::ALL
            .iter()
            .position(|&c| c == channel)
            .unwrap_or_default();
        let stat_pos = self as usize;
        channel_pos * FEATURES_PER_CHANNEL + stat_pos
    }
}

/// Cross-channel feature, emitted after all per-channel features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossFeature {
    /// Mean of sqrt(AccX² + AccY²)
    AccMagnitude,
    /// Pearson correlation of AccX and AccY
    AccXyCorrelation,
}

impl CrossFeature {
    pub const ALL: [CrossFeature; CROSS_CHANNEL_FEATURES] =
        [CrossFeature::AccMagnitude, CrossFeature::AccXyCorrelation];

    pub fn name(self) -> &'static str {
        match self {
            CrossFeature::AccMagnitude => "acc_magnitude",
            CrossFeature::AccXyCorrelation => "acc_x_y_correlation",
        }
    }

    pub fn index(self) -> usize {
        Channel::ALL.len() * FEATURES_PER_CHANNEL + self as usize
    }
}

/// Descriptive feature names in vector order
pub fn feature_names() -> Vec<String> {
    let mut names = Vec::with_capacity(FEATURE_DIMENSION);
    for channel in Channel::ALL {
        for stat in ChannelStat::ALL {
            names.push(format!("{}_{}", channel.column_name(), stat.suffix()));
        }
    }
    for cross in CrossFeature::ALL {
        names.push(cross.name().to_string());
    }
    names
}

/// Features of one window, tagged with the window's class label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature values, `FEATURE_DIMENSION` entries in `feature_names()` order
    pub values: Vec<f64>,
    /// Class label of the recording the window came from
    pub label: String,
    /// Row index of the window's first reading
    pub window_start: usize,
}

impl FeatureVector {
    /// Value of a per-channel statistic
    pub fn channel_stat(&self, channel: Channel, stat: ChannelStat) -> f64 {
        self.values[stat.index(channel)]
    }

    /// Value of a cross-channel feature
    pub fn cross(&self, feature: CrossFeature) -> f64 {
        self.values[feature.index()]
    }

    /// Compare values bit for bit, so NaN equals NaN
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.window_start == other.window_start
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// Stateless windowed feature extractor.
///
/// Holds only the validated configuration and precomputed FFT plans; every
/// window is computed independently of every other.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: WindowConfig,
    spectrum: SpectrumAnalyzer,
}

impl FeatureExtractor {
    /// Create an extractor, rejecting invalid configurations
    pub fn new(config: WindowConfig) -> Result<Self, FeatureError> {
        config.validate()?;
        Ok(Self {
            config,
            spectrum: SpectrumAnalyzer::new(config.window_size),
        })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Number of vectors a series of `len` rows produces
    pub fn window_count(&self, len: usize) -> usize {
        self.config.window_count(len)
    }

    /// Compute the feature values of one window
    pub fn extract_values(&self, window: &[SensorReading]) -> Result<Vec<f64>, FeatureError> {
        if window.len() != self.config.window_size {
            return Err(FeatureError::WindowLength {
                expected: self.config.window_size,
                actual: window.len(),
            });
        }
        Ok(self.compute(window))
    }

    /// Compute the tagged feature vector of one window
    pub fn extract_window(
        &self,
        window: &[SensorReading],
        label: &str,
        window_start: usize,
    ) -> Result<FeatureVector, FeatureError> {
        Ok(FeatureVector {
            values: self.extract_values(window)?,
            label: label.to_string(),
            window_start,
        })
    }

    /// Lazily extract one vector per full window of a series
    pub fn extract_series<'a>(&'a self, series: &'a LabeledSeries) -> SeriesFeatures<'a> {
        debug!(
            "Extracting '{}': {} rows -> {} windows",
            series.label,
            series.len(),
            self.window_count(series.len())
        );
        SeriesFeatures {
            extractor: self,
            label: &series.label,
            windows: Windows::from_validated(&series.readings, &self.config),
        }
    }

    fn compute(&self, window: &[SensorReading]) -> Vec<f64> {
        let policy = self.config.degeneracy;
        let mut values = Vec::with_capacity(FEATURE_DIMENSION);

        for channel in Channel::ALL {
            let data = channel_values(window, channel);
            let time = TimeDomainFeatures::compute(&data, policy);
            let freq = self.spectrum.analyze(&data);

            values.extend_from_slice(&[
                time.mean,
                time.std_dev,
                time.variance,
                time.min,
                time.max,
                time.range,
                time.median,
                time.q25,
                time.q75,
                time.iqr,
                time.skewness,
                time.kurtosis,
                time.rms,
                time.energy,
                freq.fft_mean,
                freq.fft_std,
                freq.fft_max,
                freq.dominant_bin as f64,
                freq.psd_mean,
                freq.psd_max,
            ]);
        }

        let acc_x = channel_values(window, Channel::AccX);
        let acc_y = channel_values(window, Channel::AccY);

        let magnitude = acc_x
            .iter()
            .zip(&acc_y)
            .map(|(x, y)| (x * x + y * y).sqrt())
            .sum::<f64>()
            / window.len() as f64;

        values.push(magnitude);
        values.push(pearson_correlation(&acc_x, &acc_y, policy));

        debug_assert_eq!(values.len(), FEATURE_DIMENSION);
        values
    }
}

/// Lazy iterator of feature vectors over one series
#[derive(Debug, Clone)]
pub struct SeriesFeatures<'a> {
    extractor: &'a FeatureExtractor,
    label: &'a str,
    windows: Windows<'a, SensorReading>,
}

impl Iterator for SeriesFeatures<'_> {
    type Item = FeatureVector;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, window) = self.windows.next()?;
        Some(FeatureVector {
            values: self.extractor.compute(window),
            label: self.label.to_string(),
            window_start: start,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.windows.size_hint()
    }
}

impl ExactSizeIterator for SeriesFeatures<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(len: usize, f: impl Fn(usize) -> (f64, f64, f64)) -> LabeledSeries {
        let readings = (0..len)
            .map(|i| {
                let (l, x, y) = f(i);
                SensorReading {
                    relative_time: i as f64 * 20.0,
                    linear_acceleration: l,
                    acc_x: x,
                    acc_y: y,
                }
            })
            .collect();
        LabeledSeries::new("Rua/Asfalto", readings)
    }

    #[test]
    fn test_dimension() {
        assert_eq!(FEATURE_DIMENSION, 62);
        assert_eq!(feature_names().len(), FEATURE_DIMENSION);
    }

    #[test]
    fn test_feature_name_order() {
        let names = feature_names();
        assert_eq!(names[0], "LinearAccelerometerSensor_mean");
        assert_eq!(names[19], "LinearAccelerometerSensor_psd_max");
        assert_eq!(names[20], "AccX_mean");
        assert_eq!(names[ChannelStat::Q75.index(Channel::AccY)], "AccY_q75");
        assert_eq!(names[60], "acc_magnitude");
        assert_eq!(names[61], "acc_x_y_correlation");
    }

    #[test]
    fn test_extract_series_counts() {
        let extractor = FeatureExtractor::new(WindowConfig::default()).unwrap();
        let s = series(250, |i| (i as f64, (i % 7) as f64, (i % 5) as f64));
        let vectors: Vec<_> = extractor.extract_series(&s).collect();
        assert_eq!(vectors.len(), 4);
        let starts: Vec<_> = vectors.iter().map(|v| v.window_start).collect();
        assert_eq!(starts, vec![0, 50, 100, 150]);
        assert!(vectors.iter().all(|v| v.label == "Rua/Asfalto"));
        assert!(vectors.iter().all(|v| v.values.len() == FEATURE_DIMENSION));
    }

    #[test]
    fn test_constant_window() {
        let extractor = FeatureExtractor::new(WindowConfig::default()).unwrap();
        let s = series(100, |_| (1.0, 1.0, 1.0));
        let v = extractor.extract_series(&s).next().unwrap();

        for channel in Channel::ALL {
            assert_eq!(v.channel_stat(channel, ChannelStat::Std), 0.0);
            assert_eq!(v.channel_stat(channel, ChannelStat::Var), 0.0);
            assert_eq!(v.channel_stat(channel, ChannelStat::Range), 0.0);
            assert_eq!(v.channel_stat(channel, ChannelStat::Energy), 100.0);
            assert!(v.channel_stat(channel, ChannelStat::Skewness).is_nan());
            assert!(v.channel_stat(channel, ChannelStat::Kurtosis).is_nan());
            assert_eq!(v.channel_stat(channel, ChannelStat::DominantFreq), 0.0);
        }
        assert!(v.cross(CrossFeature::AccXyCorrelation).is_nan());
        assert!((v.cross(CrossFeature::AccMagnitude) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_window_non_dyadic_values() {
        let extractor = FeatureExtractor::new(WindowConfig::default()).unwrap();
        for c in [0.1, 0.3, 9.81] {
            let s = series(100, |_| (c, c, c));
            let v = extractor.extract_series(&s).next().unwrap();

            for channel in Channel::ALL {
                assert_eq!(v.channel_stat(channel, ChannelStat::Mean), c);
                assert_eq!(v.channel_stat(channel, ChannelStat::Std), 0.0);
                assert_eq!(v.channel_stat(channel, ChannelStat::Var), 0.0);
                assert!(v.channel_stat(channel, ChannelStat::Skewness).is_nan());
                assert!(v.channel_stat(channel, ChannelStat::Kurtosis).is_nan());
            }
            assert!(v.cross(CrossFeature::AccXyCorrelation).is_nan(), "correlation of constant {}", c);
        }
    }

    #[test]
    fn test_constant_window_zero_policy() {
        let config = WindowConfig::default().with_degeneracy(crate::DegeneracyPolicy::Zero);
        let extractor = FeatureExtractor::new(config).unwrap();
        let s = series(100, |_| (1.0, 1.0, 1.0));
        let v = extractor.extract_series(&s).next().unwrap();

        assert!(v.values.iter().all(|x| !x.is_nan()));
        assert_eq!(v.channel_stat(Channel::AccX, ChannelStat::Skewness), 0.0);
        assert_eq!(v.cross(CrossFeature::AccXyCorrelation), 0.0);
    }

    #[test]
    fn test_extract_window_checks_length() {
        let extractor = FeatureExtractor::new(WindowConfig::new(10, 5).unwrap()).unwrap();
        let s = series(9, |i| (i as f64, 0.0, 0.0));
        let err = extractor.extract_window(&s.readings, &s.label, 0).unwrap_err();
        assert_eq!(
            err,
            FeatureError::WindowLength {
                expected: 10,
                actual: 9
            }
        );
    }

    #[test]
    fn test_extract_window_matches_series() {
        let extractor = FeatureExtractor::new(WindowConfig::new(16, 8).unwrap()).unwrap();
        let s = series(40, |i| ((i as f64).sin(), (i as f64 * 0.3).cos(), i as f64 * 0.1));
        let from_series: Vec<_> = extractor.extract_series(&s).collect();
        let direct = extractor
            .extract_window(&s.readings[8..24], &s.label, 8)
            .unwrap();
        assert!(from_series[1].bitwise_eq(&direct));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WindowConfig {
            window_size: 10,
            overlap: 10,
            ..Default::default()
        };
        assert!(matches!(
            FeatureExtractor::new(config),
            Err(FeatureError::Config(_))
        ));
    }
}
