//! Property tests for windowing and feature extraction
//!
//! Covers:
//! - Window count formula for every valid configuration
//! - Constant dimensionality and label tagging
//! - Determinism across runs
//! - Exact range / energy consistency
//! - Correlation bounds

use feature_engine::{
    ChannelStat, CrossFeature, FeatureExtractor, WindowConfig, Windows, FEATURE_DIMENSION,
};
use proptest::prelude::*;
use sensor_log::{channel_values, Channel, LabeledSeries, SensorReading};

fn config_strategy() -> impl Strategy<Value = WindowConfig> {
    (1usize..48).prop_flat_map(|size| {
        (Just(size), 0..size).prop_map(|(size, overlap)| WindowConfig::new(size, overlap).unwrap())
    })
}

fn series_strategy(max_len: usize) -> impl Strategy<Value = LabeledSeries> {
    prop::collection::vec((-20.0f64..20.0, -20.0f64..20.0, -20.0f64..20.0), 0..max_len).prop_map(
        |rows| {
            let readings = rows
                .into_iter()
                .enumerate()
                .map(|(i, (l, x, y))| SensorReading {
                    relative_time: i as f64 * 20.0,
                    linear_acceleration: l,
                    acc_x: x,
                    acc_y: y,
                })
                .collect();
            LabeledSeries::new("Cimento Pavimentado", readings)
        },
    )
}

fn expected_count(len: usize, config: &WindowConfig) -> usize {
    if len >= config.window_size {
        (len - config.window_size) / config.step() + 1
    } else {
        0
    }
}

proptest! {
    #[test]
    fn prop_window_count_formula(config in config_strategy(), len in 0usize..400) {
        let data: Vec<usize> = (0..len).collect();
        let windows = Windows::new(&data, &config).unwrap();
        prop_assert_eq!(windows.len(), expected_count(len, &config));
        prop_assert_eq!(windows.count(), expected_count(len, &config));
        prop_assert_eq!(config.window_count(len), expected_count(len, &config));
    }

    #[test]
    fn prop_windows_are_contiguous_full_slices(config in config_strategy(), len in 0usize..200) {
        let data: Vec<usize> = (0..len).collect();
        for (k, (start, window)) in Windows::new(&data, &config).unwrap().enumerate() {
            prop_assert_eq!(start, k * config.step());
            prop_assert_eq!(window.len(), config.window_size);
            prop_assert_eq!(window[0], start);
            prop_assert!(start + config.window_size <= len);
        }
    }

    #[test]
    fn prop_disjoint_windows_reconstruct_prefix(size in 1usize..32, len in 0usize..200) {
        let data: Vec<usize> = (0..len).collect();
        let config = WindowConfig::new(size, 0).unwrap();
        let joined: Vec<usize> = Windows::new(&data, &config)
            .unwrap()
            .flat_map(|(_, w)| w.iter().copied())
            .collect();
        let covered = (len / size) * size;
        prop_assert_eq!(joined, data[..covered].to_vec());
    }

    #[test]
    fn prop_unit_step_maximises_windows(size in 1usize..32, len in 0usize..200) {
        let data = vec![0u8; len];
        let config = WindowConfig::new(size, size - 1).unwrap();
        let count = Windows::new(&data, &config).unwrap().count();
        prop_assert_eq!(count, expected_count(len, &config));
        if len >= size {
            prop_assert_eq!(count, len - size + 1);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_vectors_have_fixed_shape(config in config_strategy(), series in series_strategy(160)) {
        let extractor = FeatureExtractor::new(config).unwrap();
        let vectors: Vec<_> = extractor.extract_series(&series).collect();

        prop_assert_eq!(vectors.len(), expected_count(series.len(), &config));
        for (k, v) in vectors.iter().enumerate() {
            prop_assert_eq!(v.values.len(), FEATURE_DIMENSION);
            prop_assert_eq!(&v.label, "Cimento Pavimentado");
            prop_assert_eq!(v.window_start, k * config.step());
        }
    }

    #[test]
    fn prop_extraction_is_deterministic(config in config_strategy(), series in series_strategy(120)) {
        let extractor = FeatureExtractor::new(config).unwrap();
        let first: Vec<_> = extractor.extract_series(&series).collect();
        let second: Vec<_> = extractor.extract_series(&series).collect();

        let rebuilt = FeatureExtractor::new(config).unwrap();
        let third: Vec<_> = rebuilt.extract_series(&series).collect();

        prop_assert_eq!(first.len(), second.len());
        for ((a, b), c) in first.iter().zip(&second).zip(&third) {
            prop_assert!(a.bitwise_eq(b));
            prop_assert!(a.bitwise_eq(c));
        }
    }

    #[test]
    fn prop_range_and_energy_exact(config in config_strategy(), series in series_strategy(120)) {
        let extractor = FeatureExtractor::new(config).unwrap();
        for v in extractor.extract_series(&series) {
            let window = &series.readings[v.window_start..v.window_start + config.window_size];
            for channel in Channel::ALL {
                let max = v.channel_stat(channel, ChannelStat::Max);
                let min = v.channel_stat(channel, ChannelStat::Min);
                prop_assert_eq!(v.channel_stat(channel, ChannelStat::Range), max - min);

                let energy: f64 = channel_values(window, channel).iter().map(|x| x * x).sum();
                prop_assert_eq!(v.channel_stat(channel, ChannelStat::Energy), energy);
            }
        }
    }

    #[test]
    fn prop_correlation_bounded(config in config_strategy(), series in series_strategy(120)) {
        let extractor = FeatureExtractor::new(config).unwrap();
        for v in extractor.extract_series(&series) {
            let r = v.cross(CrossFeature::AccXyCorrelation);
            let std_x = v.channel_stat(Channel::AccX, ChannelStat::Std);
            let std_y = v.channel_stat(Channel::AccY, ChannelStat::Std);
            if std_x > 0.0 && std_y > 0.0 {
                prop_assert!((-1.0..=1.0).contains(&r), "correlation {} out of bounds", r);
            } else {
                prop_assert!(r.is_nan());
            }
        }
    }
}

#[test]
fn scenario_250_rows_default_config() {
    let readings: Vec<_> = (0..250)
        .map(|i| SensorReading {
            relative_time: i as f64,
            linear_acceleration: (i as f64 * 0.1).sin(),
            acc_x: (i as f64 * 0.2).cos(),
            acc_y: (i % 9) as f64,
        })
        .collect();
    let series = LabeledSeries::new("Rua/Asfalto", readings);
    let extractor = FeatureExtractor::new(WindowConfig::default()).unwrap();

    let starts: Vec<_> = extractor.extract_series(&series).map(|v| v.window_start).collect();
    assert_eq!(starts, vec![0, 50, 100, 150]);
}

#[test]
fn scenario_99_rows_yields_nothing() {
    let series = LabeledSeries::new("Terra Batida", vec![SensorReading::default(); 99]);
    for overlap in [0, 1, 50, 99] {
        let extractor = FeatureExtractor::new(WindowConfig::new(100, overlap).unwrap()).unwrap();
        assert_eq!(extractor.extract_series(&series).count(), 0);
    }
}
