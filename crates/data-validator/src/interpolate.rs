//! Gap Filling and Row Filtering

use sensor_log::{Channel, RawReading, SensorReading};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of cleaning a recording
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows received
    pub input_rows: usize,
    /// Cells filled by interpolation, all channels
    pub interpolated_cells: usize,
    /// Rows dropped because a cell was still missing
    pub dropped_rows: usize,
    /// Rows kept
    pub output_rows: usize,
}

/// Fill missing values of one channel by position.
///
/// Gaps between two known values are filled on the straight line joining
/// them. Gaps after the last known value repeat it. Gaps before the first
/// known value have nothing to interpolate from and stay missing.
///
/// Returns the number of cells filled.
pub fn interpolate_linear(values: &mut [Option<f64>]) -> usize {
    let mut filled = 0;
    let mut last_known: Option<(usize, f64)> = None;

    for i in 0..values.len() {
        let Some(current) = values[i] else {
            continue;
        };

        if let Some((start, start_value)) = last_known {
            let span = (i - start) as f64;
            for (offset, slot) in values[start + 1..i].iter_mut().enumerate() {
                let t = (offset + 1) as f64 / span;
                *slot = Some(start_value + (current - start_value) * t);
                filled += 1;
            }
        }
        last_known = Some((i, current));
    }

    if let Some((end, end_value)) = last_known {
        for slot in values[end + 1..].iter_mut() {
            *slot = Some(end_value);
            filled += 1;
        }
    }

    filled
}

/// Interpolate every sensor channel, then drop rows that are still incomplete.
///
/// `relative_time` is never interpolated, so rows missing a timestamp are
/// always dropped.
pub fn clean(raw: &[RawReading]) -> (Vec<SensorReading>, CleaningReport) {
    let mut rows = raw.to_vec();
    let mut interpolated_cells = 0;

    for channel in Channel::ALL {
        let mut column: Vec<Option<f64>> = rows.iter().map(|r| r.channel(channel)).collect();
        let filled = interpolate_linear(&mut column);
        if filled > 0 {
            debug!("Interpolated {} cells of {}", filled, channel);
        }
        interpolated_cells += filled;

        for (row, value) in rows.iter_mut().zip(column) {
            *row.channel_mut(channel) = value;
        }
    }

    let readings: Vec<SensorReading> = rows.iter().filter_map(RawReading::complete).collect();

    let report = CleaningReport {
        input_rows: raw.len(),
        interpolated_cells,
        dropped_rows: raw.len() - readings.len(),
        output_rows: readings.len(),
    };

    info!(
        "Cleaned recording: {} rows in, {} interpolated cells, {} dropped, {} out",
        report.input_rows, report.interpolated_cells, report.dropped_rows, report.output_rows
    );

    (readings, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_gap_is_linear() {
        let mut values = vec![Some(1.0), None, None, Some(4.0)];
        let filled = interpolate_linear(&mut values);
        assert_eq!(filled, 2);
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_trailing_gap_repeats_last_value() {
        let mut values = vec![Some(1.0), None, Some(3.0), None, None];
        interpolate_linear(&mut values);
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0), Some(3.0), Some(3.0)]);
    }

    #[test]
    fn test_leading_gap_stays_missing() {
        let mut values = vec![None, None, Some(5.0), Some(6.0)];
        let filled = interpolate_linear(&mut values);
        assert_eq!(filled, 0);
        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
    }

    #[test]
    fn test_all_missing() {
        let mut values = vec![None; 4];
        assert_eq!(interpolate_linear(&mut values), 0);
        assert!(values.iter().all(Option::is_none));
    }

    #[test]
    fn test_clean_drops_incomplete_rows() {
        let raw = vec![
            RawReading {
                relative_time: Some(0.0),
                linear_acceleration: None,
                acc_x: Some(1.0),
                acc_y: Some(1.0),
            },
            RawReading {
                relative_time: Some(20.0),
                linear_acceleration: Some(2.0),
                acc_x: None,
                acc_y: Some(3.0),
            },
            RawReading {
                relative_time: None,
                linear_acceleration: Some(4.0),
                acc_x: Some(5.0),
                acc_y: Some(5.0),
            },
            RawReading {
                relative_time: Some(60.0),
                linear_acceleration: Some(6.0),
                acc_x: Some(7.0),
                acc_y: None,
            },
        ];

        let (readings, report) = clean(&raw);

        // Row 0 has a leading gap, row 2 has no timestamp
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].relative_time, 20.0);
        assert_eq!(readings[0].acc_x, 3.0);
        assert_eq!(readings[1].acc_y, 5.0);
        assert_eq!(report.input_rows, 4);
        assert_eq!(report.dropped_rows, 2);
        assert_eq!(report.interpolated_cells, 2);
        assert_eq!(report.output_rows, 2);
    }
}
