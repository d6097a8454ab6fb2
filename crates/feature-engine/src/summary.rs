//! Exploratory Recording Summary

use crate::config::DegeneracyPolicy;
use crate::statistics::{mean, pearson_correlation, percentile_sorted};
use sensor_log::{channel_values, Channel, LabeledSeries};
use serde::{Deserialize, Serialize};

/// Descriptive statistics of one channel over a whole recording
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ChannelSummary {
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let m = mean(values);
        let std = if values.len() > 1 {
            let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
            (ss / (values.len() - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Self {
            count: values.len(),
            mean: m,
            std,
            min: sorted[0],
            q25: percentile_sorted(&sorted, 25.0),
            median: percentile_sorted(&sorted, 50.0),
            q75: percentile_sorted(&sorted, 75.0),
            max: sorted[sorted.len() - 1],
        }
    }
}

/// Exploratory summary of one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub label: String,
    pub rows: usize,
    pub duration_ms: f64,
    /// Per-channel statistics, in `Channel::ALL` order
    pub channels: Vec<(Channel, ChannelSummary)>,
    /// Pearson correlation between channels, in `Channel::ALL` order
    pub correlation: [[f64; 3]; 3],
}

impl SeriesSummary {
    /// Summarise a cleaned recording
    pub fn compute(series: &LabeledSeries) -> Self {
        let columns: Vec<Vec<f64>> = Channel::ALL
            .iter()
            .map(|&c| channel_values(&series.readings, c))
            .collect();

        let channels = Channel::ALL
            .iter()
            .zip(&columns)
            .map(|(&c, values)| (c, ChannelSummary::compute(values)))
            .collect();

        let mut correlation = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                correlation[i][j] =
                    pearson_correlation(&columns[i], &columns[j], DegeneracyPolicy::Nan);
            }
        }

        Self {
            label: series.label.clone(),
            rows: series.len(),
            duration_ms: series.duration_ms(),
            channels,
            correlation,
        }
    }
}
