//! Surface Feature Extraction CLI
//!
//! Turns labelled accelerometer recordings into the windowed feature table
//! consumed by the surface classifier.

pub mod pipeline;
pub mod report;
pub mod settings;

use clap::{Args, Parser, Subcommand};
use feature_engine::DegeneracyPolicy;
use settings::{InputSpec, PipelineConfig};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use pipeline::{prepare, run_extract, run_summary, PreparedRecording};
pub use report::{FileReport, OutputFiles, RunReport};

/// Windowed feature extraction for cycling-surface recordings
#[derive(Debug, Parser)]
#[command(name = "surface-features", version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract the labelled feature table from the recordings
    Extract(ExtractArgs),
    /// Print descriptive statistics of each recording
    Summary(SummaryArgs),
    /// List the feature columns in table order
    Features,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Recording as PATH or PATH=LABEL; repeat for several files
    #[arg(short, long = "input", value_parser = InputSpec::parse)]
    pub inputs: Vec<InputSpec>,

    /// Samples per window
    #[arg(short, long)]
    pub window_size: Option<usize>,

    /// Samples shared by consecutive windows
    #[arg(short, long)]
    pub overlap: Option<usize>,

    /// Value of undefined statistics: nan or zero
    #[arg(long, value_parser = parse_degeneracy)]
    pub degeneracy: Option<DegeneracyPolicy>,

    /// Directory for the table, mapping and report
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also write a binary snapshot of the table
    #[arg(long)]
    pub snapshot: bool,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Recording as PATH or PATH=LABEL; repeat for several files
    #[arg(short, long = "input", value_parser = InputSpec::parse)]
    pub inputs: Vec<InputSpec>,

    /// Also write the summaries as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Snapshot file name used when `--snapshot` is given without a configured name
pub const DEFAULT_SNAPSHOT: &str = "dados_organizados.bin";

fn parse_degeneracy(value: &str) -> Result<DegeneracyPolicy, String> {
    match value.to_ascii_lowercase().as_str() {
        "nan" => Ok(DegeneracyPolicy::Nan),
        "zero" => Ok(DegeneracyPolicy::Zero),
        other => Err(format!("unknown degeneracy policy '{}', expected nan or zero", other)),
    }
}

impl ExtractArgs {
    /// Apply command-line flags on top of the loaded configuration
    pub fn apply(&self, config: &mut PipelineConfig) {
        if !self.inputs.is_empty() {
            config.inputs = self.inputs.clone();
        }
        if let Some(size) = self.window_size {
            config.window.window_size = size;
        }
        if let Some(overlap) = self.overlap {
            config.window.overlap = overlap;
        }
        if let Some(policy) = self.degeneracy {
            config.window.degeneracy = policy;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.snapshot && config.output.snapshot.is_none() {
            config.output.snapshot = Some(DEFAULT_SNAPSHOT.to_string());
        }
    }
}

impl SummaryArgs {
    pub fn apply(&self, config: &mut PipelineConfig) {
        if !self.inputs.is_empty() {
            config.inputs = self.inputs.clone();
        }
    }
}

/// Initialize logging; `RUST_LOG` wins unless `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
