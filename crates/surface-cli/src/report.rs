//! Run report

use chrono::{DateTime, Utc};
use data_validator::CleaningReport;
use dataset::ClassCount;
use feature_engine::WindowConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of processing one recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub label: String,
    pub cleaning: CleaningReport,
    /// Non-fatal validation findings
    pub warnings: usize,
    pub windows: usize,
    pub extraction_ms: f64,
    /// Mean extraction time per window, 0 when no window was emitted
    pub per_window_us: f64,
}

impl FileReport {
    pub fn timing(&mut self, elapsed: Duration) {
        self.extraction_ms = elapsed.as_secs_f64() * 1e3;
        self.per_window_us = if self.windows == 0 {
            0.0
        } else {
            elapsed.as_secs_f64() * 1e6 / self.windows as f64
        };
    }
}

/// Files written by a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputFiles {
    pub features_csv: PathBuf,
    pub feature_mapping: PathBuf,
    pub snapshot: Option<PathBuf>,
}

/// Summary of one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub window: WindowConfig,
    pub feature_dimension: usize,
    pub files: Vec<FileReport>,
    pub total_windows: usize,
    pub class_distribution: Vec<ClassCount>,
    pub nan_cells: usize,
    pub outputs: OutputFiles,
}

impl RunReport {
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
