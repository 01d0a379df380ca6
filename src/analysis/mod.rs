//! Analysis pipeline: voltage summary, beat detection, heart-rate
//! derivation. Each stage consumes the previous stage's output; nothing
//! is mutated in place, so the stages are unit-testable in isolation.

pub mod beats;
pub mod heart_rate;
pub mod peak;

pub use beats::{Beat, BeatDetector, BeatSet};
pub use peak::PeakFinder;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::AnalysisReport;
use crate::signal::Signal;

/// Analyze one recording with the heart rate averaged over the whole
/// recording.
pub fn analyze(signal: &Signal, config: &AnalysisConfig) -> Result<AnalysisReport> {
    analyze_range(signal, config, None, None)
}

/// Analyze one recording with explicit heart-rate range bounds.
///
/// Summary fields (extremes, duration, beat count) are computed before
/// the rate, so a failing rate calculation never produces a report with
/// corrupted fields: the whole call returns `Err` and nothing is written.
pub fn analyze_range(
    signal: &Signal,
    config: &AnalysisConfig,
    start_ts: Option<f64>,
    end_ts: Option<f64>,
) -> Result<AnalysisReport> {
    let extremes = signal.voltage_extremes();
    let duration = signal.duration();
    let beat_set = BeatDetector::new(&config.detector).detect(signal)?;
    let mean_hr_bpm = heart_rate::mean_hr_bpm(&beat_set, signal, start_ts, end_ts)?;
    Ok(AnalysisReport {
        mean_hr_bpm,
        voltage_extremes: [extremes.min, extremes.max],
        duration,
        num_beats: beat_set.num_beats(),
        beats: beat_set.timestamps(),
    })
}
