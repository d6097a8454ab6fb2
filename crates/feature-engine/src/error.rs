//! Feature Engine Error Types

use thiserror::Error;

/// Invalid windowing configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("window_size must be at least 1")]
    ZeroWindowSize,
    #[error("overlap {overlap} must be smaller than window_size {window_size}")]
    OverlapTooLarge { overlap: usize, window_size: usize },
}

/// Errors during feature extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Window has {actual} rows, extractor is configured for {expected}")]
    WindowLength { expected: usize, actual: usize },
}
