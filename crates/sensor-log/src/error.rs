//! Sensor Log Error Types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while reading a recording
#[derive(Debug, Error)]
pub enum LoadError {
    /// Recording could not be opened or read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV structure
    #[error("Malformed CSV at row {row}: {message}")]
    Csv { row: usize, message: String },

    /// Header is missing a required column
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A cell could not be parsed as a number
    #[error("Invalid number {value:?} in column {column} at row {row}")]
    InvalidNumber {
        column: &'static str,
        row: usize,
        value: String,
    },

    /// Content error in a named recording file
    #[error("Invalid recording {}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<LoadError>,
    },
}

impl LoadError {
    /// Attach the recording path to a content error
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            LoadError::Io { .. } | LoadError::InFile { .. } => self,
            other => LoadError::InFile {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// Recording the error refers to, when known
    pub fn path(&self) -> Option<&Path> {
        match self {
            LoadError::Io { path, .. } | LoadError::InFile { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }

    /// 1-based CSV line the error refers to, when known
    pub fn row(&self) -> Option<usize> {
        match self {
            LoadError::Csv { row, .. } | LoadError::InvalidNumber { row, .. } => Some(*row),
            LoadError::InFile { source, .. } => source.row(),
            _ => None,
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let row = err.position().map(|p| p.line() as usize).unwrap_or(0);
        LoadError::Csv {
            row,
            message: err.to_string(),
        }
    }
}
