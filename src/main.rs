use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

use pulsetrace::config::AnalysisConfig;
use pulsetrace::{AnalysisReport, analyze_range, ingest, report};

#[derive(Parser, Debug)]
#[command(name = "pulsetrace")]
#[command(about = "Analyze ECG recordings for heart-rate statistics", long_about = None)]
struct Args {
    /// ECG CSV files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format for the stdout summary: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Directory receiving one JSON report per input
    #[arg(short = 'o', long, default_value = "output")]
    output_dir: PathBuf,

    /// Heart-rate range start in seconds (defaults to the recording start)
    #[arg(long)]
    start: Option<f64>,

    /// Heart-rate range end in seconds (defaults to the recording end)
    #[arg(long)]
    end: Option<f64>,

    /// Skip writing the per-file JSON report artifacts
    #[arg(long)]
    no_report: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct FileAnalysis {
    filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = AnalysisConfig::default();
    config.report.output_dir = args.output_dir.clone();

    let results: Vec<FileAnalysis> = args
        .files
        .iter()
        .map(|path| analyze_file(path, &config, args.start, args.end, args.no_report))
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&results),
        OutputFormat::Json => print_json(&results)?,
    }

    if results.iter().all(|r| r.error.is_some()) {
        anyhow::bail!("all {} input file(s) failed", results.len());
    }
    Ok(())
}

fn analyze_file(
    path: &Path,
    config: &AnalysisConfig,
    start_ts: Option<f64>,
    end_ts: Option<f64>,
    no_report: bool,
) -> FileAnalysis {
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match analyze_file_impl(path, config, start_ts, end_ts, no_report) {
        Ok(analysis) => FileAnalysis {
            filename,
            report: Some(analysis),
            error: None,
        },
        Err(e) => FileAnalysis {
            filename,
            report: None,
            error: Some(e.to_string()),
        },
    }
}

fn analyze_file_impl(
    path: &Path,
    config: &AnalysisConfig,
    start_ts: Option<f64>,
    end_ts: Option<f64>,
    no_report: bool,
) -> anyhow::Result<AnalysisReport> {
    let signal = ingest::load_signal(path)?;
    let analysis = analyze_range(&signal, config, start_ts, end_ts)?;
    if !no_report {
        let target = report::report_path(path, &config.report.output_dir);
        report::write_report(&analysis, &target)?;
    }
    Ok(analysis)
}

fn print_text(results: &[FileAnalysis]) {
    println!(
        "{:<40} {:>10} {:>7} {:>10} {:>18}",
        "File", "MeanBPM", "Beats", "Duration", "Voltage range"
    );
    println!("{}", "-".repeat(89));

    for result in results {
        if let Some(ref err) = result.error {
            println!("{:<40} ERROR: {}", result.filename, err);
            continue;
        }
        let Some(ref analysis) = result.report else {
            continue;
        };
        println!(
            "{:<40} {:>10.4} {:>7} {:>9.3}s {:>9.3}..{:.3} V",
            result.filename,
            analysis.mean_hr_bpm,
            analysis.num_beats,
            analysis.duration,
            analysis.voltage_extremes[0],
            analysis.voltage_extremes[1],
        );
    }
}

fn print_json(results: &[FileAnalysis]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}
