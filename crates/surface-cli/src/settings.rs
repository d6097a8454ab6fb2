//! Pipeline configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `SURFACE__*` environment variables. Command-line flags are
//! applied last by the caller.

use config::{Config, Environment, File};
use data_validator::ValidationConfig;
use feature_engine::WindowConfig;
use sensor_log::SurfaceType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `SURFACE__WINDOW__OVERLAP=25`
pub const ENV_PREFIX: &str = "SURFACE";

/// One labelled recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    pub path: PathBuf,
    /// Explicit class label
    #[serde(default)]
    pub label: Option<String>,
    /// Surface whose default label is used when no label is given
    #[serde(default)]
    pub surface: Option<SurfaceType>,
}

impl InputSpec {
    pub fn new(path: impl Into<PathBuf>, label: Option<String>) -> Self {
        Self {
            path: path.into(),
            label,
            surface: None,
        }
    }

    pub fn for_surface(path: impl Into<PathBuf>, surface: SurfaceType) -> Self {
        Self {
            path: path.into(),
            label: None,
            surface: Some(surface),
        }
    }

    /// Label: explicit, else the surface default, else the file stem
    pub fn resolved_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        if let Some(surface) = self.surface {
            return surface.default_label().to_string();
        }
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Parse `PATH` or `PATH=LABEL`
    pub fn parse(spec: &str) -> Result<Self, String> {
        let (path, label) = match spec.split_once('=') {
            Some((path, label)) => (path.trim(), Some(label.trim())),
            None => (spec.trim(), None),
        };
        if path.is_empty() {
            return Err(format!("input {:?} has no path", spec));
        }
        if label.is_some_and(str::is_empty) {
            return Err(format!("input {:?} has an empty label", spec));
        }
        Ok(Self::new(path, label.map(str::to_string)))
    }
}

/// Where extraction results are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub features_csv: String,
    pub feature_mapping: String,
    pub report: String,
    /// Postcard snapshot of the table, when set
    pub snapshot: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("resultados/dados_processados"),
            features_csv: "dados_organizados.csv".to_string(),
            feature_mapping: "feature_mapping.json".to_string(),
            report: "extraction_report.json".to_string(),
            snapshot: None,
        }
    }
}

impl OutputConfig {
    pub fn features_csv_path(&self) -> PathBuf {
        self.dir.join(&self.features_csv)
    }

    pub fn feature_mapping_path(&self) -> PathBuf {
        self.dir.join(&self.feature_mapping)
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(&self.report)
    }

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.as_ref().map(|name| self.dir.join(name))
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub window: WindowConfig,
    pub validation: ValidationConfig,
    pub inputs: Vec<InputSpec>,
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            validation: ValidationConfig::default(),
            inputs: vec![
                InputSpec::for_surface("dados/rua_asfalto.csv", SurfaceType::Asphalt),
                InputSpec::for_surface("dados/cimento_utinga.csv", SurfaceType::Pavement),
                InputSpec::for_surface("dados/terra_batida.csv", SurfaceType::Dirt),
            ],
            output: OutputConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load defaults, an optional file, and environment overrides
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::DegeneracyPolicy;
    use std::io::Write;

    #[test]
    fn test_parse_input_spec() {
        let spec = InputSpec::parse("dados/terra.csv=Terra Batida").unwrap();
        assert_eq!(spec.path, PathBuf::from("dados/terra.csv"));
        assert_eq!(spec.resolved_label(), "Terra Batida");

        let spec = InputSpec::parse("dados/cimento.csv").unwrap();
        assert_eq!(spec.resolved_label(), "cimento");

        assert!(InputSpec::parse("=label").is_err());
        assert!(InputSpec::parse("a.csv=").is_err());
    }

    #[test]
    fn test_surface_label() {
        let spec = InputSpec::for_surface("x.csv", SurfaceType::Pavement);
        assert_eq!(spec.resolved_label(), "Cimento Pavimentado");
    }

    #[test]
    fn test_defaults_match_reference_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.window.window_size, 100);
        assert_eq!(config.window.overlap, 50);
        assert_eq!(config.inputs.len(), 3);
        assert_eq!(
            config.output.features_csv_path(),
            PathBuf::from("resultados/dados_processados/dados_organizados.csv")
        );
        assert!(config.output.snapshot_path().is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[window]
window_size = 64
overlap = 16
degeneracy = "zero"

[output]
dir = "out"
snapshot = "dataset.bin"

[[inputs]]
path = "a.csv"
label = "A"

[[inputs]]
path = "b.csv"
surface = "dirt"
"#
        )
        .unwrap();
        drop(file);

        let config = PipelineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.window.window_size, 64);
        assert_eq!(config.window.overlap, 16);
        assert_eq!(config.window.degeneracy, DegeneracyPolicy::Zero);
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.inputs[0].resolved_label(), "A");
        assert_eq!(config.inputs[1].resolved_label(), "Terra Batida");
        assert_eq!(config.output.snapshot_path(), Some(PathBuf::from("out/dataset.bin")));
        assert_eq!(config.output.features_csv, "dados_organizados.csv");
        assert!(config.validation.require_monotonic_time);
    }
}
