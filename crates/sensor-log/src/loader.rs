//! CSV Recording Loader

use crate::{Channel, LoadError, RawReading};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Timestamp column of a recording
pub const COLUMN_RELATIVE_TIME: &str = "relative_time";

/// Column positions resolved from the header row
struct ColumnLayout {
    relative_time: usize,
    channels: [usize; 3],
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            relative_time: find(COLUMN_RELATIVE_TIME)?,
            channels: [
                find(Channel::LinearAcceleration.column_name())?,
                find(Channel::AccX.column_name())?,
                find(Channel::AccY.column_name())?,
            ],
        })
    }
}

/// Parse one cell; empty and NaN cells are missing values
fn parse_cell(
    record: &StringRecord,
    index: usize,
    column: &'static str,
    row: usize,
) -> Result<Option<f64>, LoadError> {
    let raw = match record.get(index) {
        Some(raw) => raw,
        None => return Ok(None),
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let value: f64 = raw.parse().map_err(|_| LoadError::InvalidNumber {
        column,
        row,
        value: raw.to_string(),
    })?;

    Ok(if value.is_nan() { None } else { Some(value) })
}

/// Read a recording from any CSV source.
///
/// Columns are located by header name, so column order is free and extra
/// columns are ignored. Rows whose cells are all missing are skipped.
pub fn read_csv<R: Read>(source: R) -> Result<Vec<RawReading>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let layout = ColumnLayout::from_headers(reader.headers()?)?;

    let mut readings = Vec::new();
    let mut blank_rows = 0usize;

    for result in reader.records() {
        let record = result?;
        let row = record.position().map(|p| p.line() as usize).unwrap_or(0);

        let mut reading = RawReading {
            relative_time: parse_cell(&record, layout.relative_time, COLUMN_RELATIVE_TIME, row)?,
            ..Default::default()
        };
        for (channel, &index) in Channel::ALL.iter().zip(layout.channels.iter()) {
            *reading.channel_mut(*channel) =
                parse_cell(&record, index, channel.column_name(), row)?;
        }

        if reading.is_blank() {
            blank_rows += 1;
            continue;
        }
        readings.push(reading);
    }

    debug!("Read {} rows, skipped {} blank rows", readings.len(), blank_rows);
    Ok(readings)
}

/// Load a recording from a CSV file
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<RawReading>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let readings = read_csv(file).map_err(|e| e.in_file(path))?;
    info!("Loaded {} rows from {}", readings.len(), path.display());
    Ok(readings)
}
