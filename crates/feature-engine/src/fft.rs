//! FFT-based Frequency Analysis
//!
//! Conventions, fixed so features are reproducible:
//! - DFT: forward, unnormalised, no tapering window. Magnitudes of bins
//!   `0..n/2` are kept.
//! - Welch PSD: periodic Hann segments of `min(n, 256)` samples, half-segment
//!   overlap, per-segment mean removal, one-sided density scaling with unit
//!   sampling frequency, arithmetic mean over segments.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// Longest Welch segment
pub const MAX_WELCH_SEGMENT: usize = 256;

/// Frequency-domain features of one channel over one window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralFeatures {
    /// Mean magnitude of the half spectrum
    pub fft_mean: f64,
    /// Population std of the half-spectrum magnitudes
    pub fft_std: f64,
    /// Peak magnitude
    pub fft_max: f64,
    /// Bin index of the peak magnitude
    pub dominant_bin: usize,
    /// Mean of the Welch PSD
    pub psd_mean: f64,
    /// Peak of the Welch PSD
    pub psd_max: f64,
}

/// Periodic Hann window
fn hann_periodic(len: usize) -> Vec<f64> {
    if len == 1 {
        return vec![1.0];
    }
    (0..len)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / len as f64).cos())
        .collect()
}

/// Welch power spectral density estimator for a fixed segment length
#[derive(Clone)]
pub struct WelchEstimator {
    segment_len: usize,
    overlap: usize,
    window: Vec<f64>,
    /// 1 / Σw², density scaling at fs = 1
    scale: f64,
    fft: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for WelchEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WelchEstimator")
            .field("segment_len", &self.segment_len)
            .field("overlap", &self.overlap)
            .finish()
    }
}

impl WelchEstimator {
    /// Create an estimator with the given segment length (at least 1)
    pub fn new(planner: &mut FftPlanner<f64>, segment_len: usize) -> Self {
        let segment_len = segment_len.max(1);
        let window = hann_periodic(segment_len);
        let power: f64 = window.iter().map(|w| w * w).sum();
        Self {
            segment_len,
            overlap: segment_len / 2,
            scale: 1.0 / power,
            fft: planner.plan_fft_forward(segment_len),
            window,
        }
    }

    /// Segment length used
    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    /// One-sided PSD with `segment_len / 2 + 1` bins.
    ///
    /// Empty when the signal is shorter than one segment.
    pub fn psd(&self, signal: &[f64]) -> Vec<f64> {
        let n = self.segment_len;
        if signal.len() < n {
            return Vec::new();
        }

        let step = n - self.overlap;
        let segments = (signal.len() - self.overlap) / step;
        let bins = n / 2 + 1;

        let mut psd = vec![0.0; bins];
        let mut buffer = vec![Complex::new(0.0, 0.0); n];

        for k in 0..segments {
            let segment = &signal[k * step..k * step + n];
            let seg_mean = segment.iter().sum::<f64>() / n as f64;

            for ((slot, &x), &w) in buffer.iter_mut().zip(segment).zip(&self.window) {
                *slot = Complex::new((x - seg_mean) * w, 0.0);
            }
            self.fft.process(&mut buffer);

            for (acc, c) in psd.iter_mut().zip(&buffer[..bins]) {
                *acc += c.norm_sqr() * self.scale;
            }
        }

        // Fold negative frequencies; the Nyquist bin exists only for even n
        let last = if n % 2 == 0 { bins - 1 } else { bins };
        for p in psd.iter_mut().take(last).skip(1) {
            *p *= 2.0;
        }

        let segments = segments as f64;
        for p in psd.iter_mut() {
            *p /= segments;
        }

        psd
    }
}

/// Spectrum analyzer for windows of a fixed length.
///
/// FFT plans are built once, so analysis only borrows the analyzer.
#[derive(Clone)]
pub struct SpectrumAnalyzer {
    window_len: usize,
    fft: Arc<dyn Fft<f64>>,
    welch: WelchEstimator,
}

impl fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("window_len", &self.window_len)
            .field("welch", &self.welch)
            .finish()
    }
}

impl SpectrumAnalyzer {
    /// Create an analyzer for windows of `window_len` samples
    pub fn new(window_len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let window_len = window_len.max(1);
        Self {
            window_len,
            fft: planner.plan_fft_forward(window_len),
            welch: WelchEstimator::new(&mut planner, window_len.min(MAX_WELCH_SEGMENT)),
        }
    }

    /// Window length the plans were built for
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Magnitudes of the non-negative frequency half of the DFT
    pub fn magnitude_spectrum(&self, signal: &[f64]) -> Vec<f64> {
        debug_assert_eq!(signal.len(), self.window_len);

        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
        self.fft.process(&mut buffer);

        buffer
            .iter()
            .take(signal.len() / 2)
            .map(|c| c.norm())
            .collect()
    }

    /// Welch PSD of a signal
    pub fn psd(&self, signal: &[f64]) -> Vec<f64> {
        self.welch.psd(signal)
    }

    /// Compute spectral features from a window of one channel.
    ///
    /// A one-sample window has an empty half spectrum; its magnitude
    /// statistics are reported as 0.
    pub fn analyze(&self, signal: &[f64]) -> SpectralFeatures {
        let magnitudes = self.magnitude_spectrum(signal);
        let psd = self.psd(signal);

        let mut features = SpectralFeatures::default();

        if !magnitudes.is_empty() {
            let mut max_mag = f64::NEG_INFINITY;
            let mut dominant_bin = 0;
            for (i, &m) in magnitudes.iter().enumerate() {
                if m > max_mag {
                    max_mag = m;
                    dominant_bin = i;
                }
            }

            features.fft_mean = crate::statistics::mean(&magnitudes);
            features.fft_std = crate::statistics::population_std(&magnitudes);
            features.fft_max = max_mag;
            features.dominant_bin = dominant_bin;
        }

        if !psd.is_empty() {
            features.psd_mean = crate::statistics::mean(&psd);
            features.psd_max = psd.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        }

        features
    }
}
