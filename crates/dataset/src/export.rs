//! Table Export
//!
//! CSV for the classifier, JSON for the column mapping, postcard for
//! reloading a table without recomputing features.

use crate::{Dataset, DatasetError};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Header of the class-label column
pub const LABEL_COLUMN: &str = "Classe";

/// Render a feature cell; NaN is written as an empty cell
fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Write the table as CSV: `S1..Sn,Classe`, one row per window
pub fn write_csv_to<W: Write>(dataset: &Dataset, writer: W) -> Result<(), DatasetError> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = dataset.column_names();
    header.push(LABEL_COLUMN.to_string());
    csv.write_record(&header)?;

    for row in dataset.rows() {
        let mut record: Vec<String> = row.values.iter().map(|&v| format_value(v)).collect();
        record.push(row.label.clone());
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the table as a CSV file
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), DatasetError> {
    let path = path.as_ref();
    create_parent(path)?;
    write_csv_to(dataset, BufWriter::new(File::create(path)?))?;
    info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

#[derive(Serialize)]
struct MappingEntry<'a> {
    column: &'a str,
    feature: &'a str,
}

/// Write the `S<i>` -> feature name mapping as a JSON array
pub fn write_feature_mapping(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let mapping = dataset.feature_mapping();
    let entries: Vec<MappingEntry<'_>> = mapping
        .iter()
        .map(|(column, feature)| MappingEntry { column, feature })
        .collect();

    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| DatasetError::SerializationError(e.to_string()))?;
    create_parent(path)?;
    fs::write(path, json)?;
    info!("Wrote feature mapping to {}", path.display());
    Ok(())
}

/// Save the table as a postcard snapshot
pub fn save_snapshot(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let bytes = postcard::to_allocvec(dataset)
        .map_err(|e| DatasetError::SerializationError(e.to_string()))?;
    create_parent(path)?;
    fs::write(path, &bytes)?;
    info!("Saved snapshot ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// Load a table saved with `save_snapshot`
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let bytes = fs::read(path)?;
    postcard::from_bytes(&bytes).map_err(|e| DatasetError::SerializationError(e.to_string()))
}

fn create_parent(path: &Path) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
