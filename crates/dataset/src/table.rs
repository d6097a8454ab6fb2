//! Feature Table

use crate::DatasetError;
use feature_engine::{feature_names, FeatureVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Number of windows carrying one class label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCount {
    pub label: String,
    pub count: usize,
}

/// Feature vectors from every recording, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    feature_names: Vec<String>,
    rows: Vec<FeatureVector>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Empty table with the extractor's feature layout
    pub fn new() -> Self {
        Self::with_feature_names(feature_names())
    }

    /// Empty table with a custom feature layout
    pub fn with_feature_names(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            rows: Vec::new(),
        }
    }

    /// Append one vector, rejecting a dimensionality change
    pub fn push(&mut self, vector: FeatureVector) -> Result<(), DatasetError> {
        if vector.values.len() != self.feature_names.len() {
            return Err(DatasetError::DimensionMismatch {
                expected: self.feature_names.len(),
                actual: vector.values.len(),
            });
        }
        self.rows.push(vector);
        Ok(())
    }

    /// Append every vector of one recording; returns how many were added
    pub fn extend<I>(&mut self, vectors: I) -> Result<usize, DatasetError>
    where
        I: IntoIterator<Item = FeatureVector>,
    {
        let before = self.rows.len();
        for vector in vectors {
            if let Err(e) = self.push(vector) {
                self.rows.truncate(before);
                return Err(e);
            }
        }
        let added = self.rows.len() - before;
        debug!("Appended {} rows, table now has {}", added, self.rows.len());
        Ok(added)
    }

    /// Descriptive names of the feature columns
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Features per row
    pub fn dimension(&self) -> usize {
        self.feature_names.len()
    }

    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Generic column headers `S1..Sn`
    pub fn column_names(&self) -> Vec<String> {
        (1..=self.dimension()).map(|i| format!("S{}", i)).collect()
    }

    /// Pairs of generic column header and descriptive feature name
    pub fn feature_mapping(&self) -> Vec<(String, String)> {
        self.column_names()
            .into_iter()
            .zip(self.feature_names.iter().cloned())
            .collect()
    }

    /// Rows per class, in order of first appearance
    pub fn class_distribution(&self) -> Vec<ClassCount> {
        let mut counts: Vec<ClassCount> = Vec::new();
        for row in &self.rows {
            match counts.iter_mut().find(|c| c.label == row.label) {
                Some(entry) => entry.count += 1,
                None => counts.push(ClassCount {
                    label: row.label.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }

    /// Number of cells holding NaN
    pub fn nan_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.values.iter().filter(|v| v.is_nan()).count())
            .sum()
    }

    /// Log a summary of the table
    pub fn log_summary(&self) {
        info!(
            "Dataset: {} rows, {} features, {} NaN cells",
            self.len(),
            self.dimension(),
            self.nan_count()
        );
        for class in self.class_distribution() {
            info!("  {}: {} windows", class.label, class.count);
        }
    }
}
