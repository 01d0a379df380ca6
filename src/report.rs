//! JSON report artifact, one per analyzed recording.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Snapshot of the metrics derived from one recording. Write-once: a new
/// analysis run produces a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Mean heart rate in BPM over the analyzed range
    pub mean_hr_bpm: f64,
    /// Minimum and maximum voltage, in that order
    pub voltage_extremes: [f64; 2],
    /// Recording length in seconds
    pub duration: f64,
    /// Number of detected beats
    pub num_beats: usize,
    /// Timestamps of the detected beats, ascending
    pub beats: Vec<f64>,
}

/// Report path for an input recording: the input file name with its
/// extension replaced by `.json`, under the output directory.
pub fn report_path(input: &Path, output_dir: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("report"));
    output_dir.join(Path::new(file_name).with_extension("json"))
}

/// Write the report, replacing any stale artifact at the target path.
///
/// Any previous file is deleted first and a fresh one created; this is
/// delete-then-create, not an atomic rename. The parent directory is
/// created if absent.
pub fn write_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    if path.is_file() {
        log::info!("removing stale report {}", path.display());
        fs::remove_file(path)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer(file, report)?;
    log::info!("report written to {}", path.display());
    Ok(())
}

/// Read a previously written report back from disk.
pub fn read_report(path: &Path) -> Result<AnalysisReport> {
    let file = fs::File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}
