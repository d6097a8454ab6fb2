//! Surface Feature Extraction - Main Entry Point

use anyhow::Context;
use clap::Parser;
use feature_engine::{feature_names, SeriesSummary};
use sensor_log::Channel;
use surface_cli::settings::PipelineConfig;
use surface_cli::{init_logging, run_extract, run_summary, Cli, Commands, RunReport};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    info!("=== Surface feature extraction v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = PipelineConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Extract(args) => {
            args.apply(&mut config);
            let report = run_extract(&config)?;
            print_report(&report);
        }
        Commands::Summary(args) => {
            args.apply(&mut config);
            let summaries = run_summary(&config)?;
            for summary in &summaries {
                print_summary(summary);
            }
            if let Some(path) = &args.json {
                std::fs::write(path, serde_json::to_string_pretty(&summaries)?)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Summaries written to {}", path.display());
            }
        }
        Commands::Features => {
            for (i, name) in feature_names().iter().enumerate() {
                println!("S{}\t{}", i + 1, name);
            }
        }
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "Windows of {} samples, overlap {} ({} features each)",
        report.window.window_size, report.window.overlap, report.feature_dimension
    );
    for file in &report.files {
        println!(
            "  {:<24} {:>6} rows  {:>5} windows  {:>8.3} ms  ({:.1} us/window)",
            file.label, file.cleaning.output_rows, file.windows, file.extraction_ms, file.per_window_us
        );
    }
    println!("Total windows: {}", report.total_windows);
    for class in &report.class_distribution {
        println!("  {:<24} {}", class.label, class.count);
    }
    if report.nan_cells > 0 {
        println!("Undefined feature cells: {}", report.nan_cells);
    }
    println!("Table: {}", report.outputs.features_csv.display());
}

fn print_summary(summary: &SeriesSummary) {
    println!(
        "\n{} ({} rows, {:.1} s)",
        summary.label,
        summary.rows,
        summary.duration_ms / 1e3
    );
    println!(
        "  {:<26} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "channel", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for (channel, stats) in &summary.channels {
        println!(
            "  {:<26} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            channel.column_name(),
            stats.mean,
            stats.std,
            stats.min,
            stats.q25,
            stats.median,
            stats.q75,
            stats.max
        );
    }

    println!("  correlation");
    for (i, row) in summary.correlation.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|r| format!("{:>7.3}", r)).collect();
        println!("  {:<26} {}", Channel::ALL[i].column_name(), cells.join(" "));
    }
}
