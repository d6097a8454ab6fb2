//! Training Dataset
//!
//! Concatenates feature vectors from labelled recordings into one table and
//! writes it out for the classifier collaborator.

mod export;
mod table;

pub use export::{
    load_snapshot, save_snapshot, write_csv, write_csv_to, write_feature_mapping, LABEL_COLUMN,
};
pub use table::{ClassCount, Dataset};

use thiserror::Error;

/// Dataset errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Row has {actual} features, table has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
