use crate::cli::{AnalyzeArgs, ReportFormat};
use crate::config::{AnalysisSettings, PartialAnalysisConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ringpucker::{
    engine::{error::EngineError, progress::ProgressReporter},
    workflows::{
        self,
        analyze::BatchResult,
        report::PuckeringReport,
    },
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const REPORT_STEM: &str = "puckering";

pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialAnalysisConfig::from_file(path)?,
        None => PartialAnalysisConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Analyzing ring puckering in {}...",
        settings.analysis.data_dir.display()
    );
    info!("Invoking the batch analysis workflow...");

    let analysis_config = settings.analysis.clone();
    let result = tokio::task::spawn_blocking(move || {
        workflows::analyze::run(&analysis_config, &reporter)
    })
    .await
    .map_err(|e| CliError::Other(anyhow::anyhow!("Analysis task failed: {}", e)))??;

    info!(
        "Workflow finished with {} record(s) and {} skipped file(s).",
        result.records.len(),
        result.skipped.len()
    );

    if result.records.is_empty() {
        warn!("Workflow completed but no structure could be analyzed.");
        println!("Warning: no structure could be analyzed.");
        print_skipped(&result);
        return Ok(());
    }

    let report = PuckeringReport::from_records(&result.records);
    let written = write_reports(&report, &settings)?;

    print_summary(&report, &result);
    for path in written {
        println!("✓ Report written to: {}", path.display());
    }

    Ok(())
}

fn write_reports(report: &PuckeringReport, settings: &AnalysisSettings) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(settings.formats.len());
    for format in &settings.formats {
        let path = report_path(&settings.output_directory, *format);
        info!("Writing {:?} report to {:?}", format, &path);
        let outcome = match format {
            ReportFormat::Json => report.write_json_to_path(&path),
            ReportFormat::Csv => report.write_csv_to_path(&path),
        };
        outcome.map_err(EngineError::from)?;
        written.push(path);
    }
    Ok(written)
}

fn report_path(directory: &Path, format: ReportFormat) -> PathBuf {
    directory.join(format!("{}.{}", REPORT_STEM, format.extension()))
}

fn print_summary(report: &PuckeringReport, result: &BatchResult) {
    println!();
    println!(
        "{:<28} {:>10} {:>10} {:>10}  {}",
        "Structure", "Q (Å)", "θ (°)", "φ (°)", "Conformation"
    );
    for (key, entry) in report.iter() {
        println!(
            "{:<28} {:>10.4} {:>10.2} {:>10.2}  {}",
            key,
            entry.record.amplitude,
            entry.record.theta,
            entry.record.phi,
            entry.record.conformation
        );
    }

    println!();
    let counts = report.conformation_counts();
    let tally: Vec<String> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(conformation, count)| format!("{} {}", count, conformation))
        .collect();
    println!(
        "Analyzed {} of {} structure(s): {}",
        result.records.len(),
        result.total(),
        tally.join(", ")
    );
    print_skipped(result);
}

fn print_skipped(result: &BatchResult) {
    if result.skipped.is_empty() {
        return;
    }
    println!("Skipped {} file(s):", result.skipped.len());
    for skipped in &result.skipped {
        println!("  {}: {}", skipped.source.path.display(), skipped.reason);
    }
}
