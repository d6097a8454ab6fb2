//! Feature Engineering Engine
//!
//! Splits labelled accelerometer recordings into fixed-size overlapping
//! windows and computes a fixed-order vector of statistical and spectral
//! features for each one.

mod config;
mod error;
mod features;
mod fft;
pub mod statistics;
mod summary;
mod window;

pub use config::{DegeneracyPolicy, WindowConfig, DEFAULT_OVERLAP, DEFAULT_WINDOW_SIZE};
pub use error::{ConfigError, FeatureError};
pub use features::{
    feature_names, ChannelStat, CrossFeature, FeatureExtractor, FeatureVector, SeriesFeatures,
    CROSS_CHANNEL_FEATURES, FEATURES_PER_CHANNEL, FEATURE_DIMENSION,
};
pub use fft::{SpectralFeatures, SpectrumAnalyzer, WelchEstimator, MAX_WELCH_SEGMENT};
pub use statistics::TimeDomainFeatures;
pub use summary::{ChannelSummary, SeriesSummary};
pub use window::Windows;
