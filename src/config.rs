//! Configuration for the ECG analysis pipeline.

use std::path::PathBuf;

/// System-wide analysis configuration
///
/// Contains all tuning parameters for beat detection and report output.
/// Use `AnalysisConfig::default()` for sensible defaults.
///
/// # Example
/// ```
/// use pulsetrace::AnalysisConfig;
///
/// let mut config = AnalysisConfig::default();
/// // Customize as needed
/// config.detector.min_distance = 5;
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Beat detector tuning
    pub detector: DetectorConfig,
    /// Report output configuration
    pub report: ReportConfig,
}

/// Beat detector tuning
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Amount added to every sample of the detection working copy when the
    /// recording dips below zero volts. Threshold arithmetic assumes a
    /// non-negative baseline; reported beats keep original voltages.
    pub baseline_shift: f64,
    /// Retry threshold as a fraction of the working copy's peak-to-peak
    /// range, used once when the median threshold yields no peaks.
    pub fallback_fraction: f64,
    /// Minimum samples between accepted peaks
    pub min_distance: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            baseline_shift: 1.0,
            fallback_fraction: 0.9,
            min_distance: 1,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory receiving one JSON report per input recording
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
        }
    }
}
