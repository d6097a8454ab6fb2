//! Time-Domain Statistics

use crate::config::DegeneracyPolicy;
use serde::{Deserialize, Serialize};

/// Time-domain statistics of one channel over one window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeDomainFeatures {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Population variance
    pub variance: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// max - min
    pub range: f64,
    /// 50th percentile
    pub median: f64,
    /// 25th percentile
    pub q25: f64,
    /// 75th percentile
    pub q75: f64,
    /// q75 - q25
    pub iqr: f64,
    /// Skewness (asymmetry)
    pub skewness: f64,
    /// Excess kurtosis (tailedness)
    pub kurtosis: f64,
    /// Root mean square
    pub rms: f64,
    /// Sum of squares
    pub energy: f64,
}

impl TimeDomainFeatures {
    /// Compute time-domain features from a slice of values
    pub fn compute(values: &[f64], policy: DegeneracyPolicy) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;

        let (min, max) = min_max(values);

        // Zero spread for a constant channel, whatever the summation residue
        if is_constant(min, max) {
            return Self::constant(values, policy);
        }

        // Mean
        let mean = values.iter().sum::<f64>() / n;

        // Central moments
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;

        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
        }

        let m2 = m2 / n;
        let m3 = m3 / n;
        let m4 = m4 / n;

        let variance = m2;
        let std_dev = variance.sqrt();

        // Undefined when the spread vanishes relative to the mean
        let degenerate = is_degenerate(m2, mean);

        // Skewness: m3 / m2^1.5
        let skewness = if degenerate {
            policy.value()
        } else {
            m3 / m2.powf(1.5)
        };

        // Excess kurtosis: m4 / m2² - 3
        let kurtosis = if degenerate {
            policy.value()
        } else {
            m4 / (m2 * m2) - 3.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q25 = percentile_sorted(&sorted, 25.0);
        let median = percentile_sorted(&sorted, 50.0);
        let q75 = percentile_sorted(&sorted, 75.0);

        let energy = energy(values);
        let rms = (energy / n).sqrt();

        Self {
            mean,
            std_dev,
            variance,
            min,
            max,
            range: max - min,
            median,
            q25,
            q75,
            iqr: q75 - q25,
            skewness,
            kurtosis,
            rms,
            energy,
        }
    }

    /// Features of a window whose samples all equal `values[0]`
    fn constant(values: &[f64], policy: DegeneracyPolicy) -> Self {
        let value = values[0];
        let energy = energy(values);
        Self {
            mean: value,
            std_dev: 0.0,
            variance: 0.0,
            min: value,
            max: value,
            range: 0.0,
            median: value,
            q25: value,
            q75: value,
            iqr: 0.0,
            skewness: policy.value(),
            kurtosis: policy.value(),
            rms: (energy / values.len() as f64).sqrt(),
            energy,
        }
    }
}

/// Relative resolution below which the spread counts as zero
pub const DEGENERACY_RESOLUTION: f64 = 1e-15;

/// Whether every sample of a series is identical
pub(crate) fn is_constant(min: f64, max: f64) -> bool {
    min == max
}

/// Whether a second central moment is too small for standardized moments
pub(crate) fn is_degenerate(m2: f64, mean: f64) -> bool {
    m2 <= (DEGENERACY_RESOLUTION * mean) * (DEGENERACY_RESOLUTION * mean)
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Sum of squares
pub fn energy(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum()
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for an empty slice
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / values.len() as f64).sqrt()
}

/// Percentile `p` (0..=100) of ascending-sorted values.
///
/// Interpolates linearly between the two closest ranks, with rank
/// `h = (n - 1) · p / 100`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => return f64::NAN,
        1 => return sorted[0],
        _ => {}
    }

    let h = (sorted.len() - 1) as f64 * (p / 100.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile `p` (0..=100) of unsorted values
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Clamped to [-1, 1]. Returns the policy value when either series is
/// constant or has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64], policy: DegeneracyPolicy) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return policy.value();
    }

    let (x, y) = (&x[..n], &y[..n]);
    let (x_min, x_max) = min_max(x);
    let (y_min, y_max) = min_max(y);
    if is_constant(x_min, x_max) || is_constant(y_min, y_max) {
        return policy.value();
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return policy.value();
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}
