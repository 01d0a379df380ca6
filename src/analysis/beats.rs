//! Beat detection: adaptive-threshold peak search over one recording.

use crate::config::DetectorConfig;
use crate::error::{EcgError, Result};
use crate::signal::Signal;

use super::peak::PeakFinder;

/// One detected heartbeat: the sample where a voltage peak occurred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beat {
    pub timestamp: f64,
    pub voltage: f64,
}

/// All beats detected in one recording, ascending by timestamp.
///
/// An empty set is a valid outcome, not an error; heart-rate computation
/// over an empty set yields 0 BPM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeatSet {
    beats: Vec<Beat>,
}

impl BeatSet {
    pub fn num_beats(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Beat> {
        self.beats.iter()
    }

    pub fn timestamps(&self) -> Vec<f64> {
        self.beats.iter().map(|b| b.timestamp).collect()
    }

    /// Number of beats with `start_ts <= timestamp <= end_ts`, both ends
    /// inclusive.
    pub fn count_in_range(&self, start_ts: f64, end_ts: f64) -> usize {
        self.beats
            .iter()
            .filter(|b| start_ts <= b.timestamp && b.timestamp <= end_ts)
            .count()
    }
}

/// Locates heartbeats as voltage peaks above an adaptive threshold.
///
/// The primary threshold is the median of the voltage series. If that
/// finds nothing, one retry runs at a fixed fraction of the peak-to-peak
/// range, which recovers low-amplitude and noisy recordings where the
/// median sits above every peak. Detection is deterministic: the same
/// signal always yields the same beats.
pub struct BeatDetector {
    config: DetectorConfig,
}

impl BeatDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn detect(&self, signal: &Signal) -> Result<BeatSet> {
        let voltages = signal.voltages();
        if let Some(bad) = voltages.iter().position(|v| !v.is_finite()) {
            return Err(EcgError::InvalidPeakInput(format!(
                "non-finite voltage at sample {bad}"
            )));
        }

        // Threshold arithmetic assumes a non-negative baseline; recordings
        // dipping below zero volts are shifted up, for detection only.
        // Reported beats always carry the original voltages.
        let working: Vec<f64> = if signal.voltage_extremes().min < 0.0 {
            log::debug!(
                "negative baseline, shifting working copy by +{}",
                self.config.baseline_shift
            );
            voltages
                .iter()
                .map(|v| v + self.config.baseline_shift)
                .collect()
        } else {
            voltages.to_vec()
        };

        let threshold = median(&working);
        if !threshold.is_finite() {
            return Err(EcgError::InvalidPeakInput(format!(
                "non-finite threshold {threshold}"
            )));
        }
        log::debug!("median detection threshold: {threshold:.4}");

        let finder = PeakFinder::new(threshold, self.config.min_distance);
        let mut indices = finder.find_peaks(&working);
        let mut applied_threshold = threshold;

        if indices.is_empty() {
            let low = working.iter().copied().fold(f64::INFINITY, f64::min);
            let high = working.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let fallback = low + self.config.fallback_fraction * (high - low);
            log::info!(
                "median threshold {threshold:.4} found no peaks, retrying at {fallback:.4}"
            );
            let finder = PeakFinder::new(fallback, self.config.min_distance);
            indices = finder.find_peaks(&working);
            applied_threshold = fallback;
        }

        // Drop any borderline index the finder let through.
        indices.retain(|&i| working[i] > applied_threshold);

        let beats: Vec<Beat> = indices
            .iter()
            .map(|&i| Beat {
                timestamp: signal.timestamps()[i],
                voltage: voltages[i],
            })
            .collect();

        if beats.is_empty() {
            log::warn!("no beats detected");
        } else {
            log::info!("detected {} beats", beats.len());
        }
        Ok(BeatSet { beats })
    }
}

fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn detect(timestamps: Vec<f64>, voltages: Vec<f64>) -> BeatSet {
        let signal = Signal::new(timestamps, voltages).unwrap();
        BeatDetector::new(&DetectorConfig::default())
            .detect(&signal)
            .unwrap()
    }

    #[test]
    fn test_median() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_detects_peaks_above_median() {
        let timestamps: Vec<f64> = (0..9).map(|i| i as f64 * 0.25).collect();
        let voltages = vec![0.0, 0.1, 1.0, 0.1, 0.0, 0.1, 1.2, 0.1, 0.0];
        let beats = detect(timestamps, voltages);
        assert_eq!(beats.num_beats(), 2);
        assert_relative_eq!(beats.timestamps()[0], 0.5);
        assert_relative_eq!(beats.timestamps()[1], 1.5);
    }

    #[test]
    fn test_negative_baseline_reports_original_voltage() {
        let timestamps: Vec<f64> = (0..7).map(|i| i as f64).collect();
        let voltages = vec![-0.3, -0.2, 0.9, -0.2, -0.3, -0.68, -0.3];
        let beats = detect(timestamps, voltages);
        assert_eq!(beats.num_beats(), 1);
        let beat = beats.iter().next().unwrap();
        assert_relative_eq!(beat.timestamp, 2.0);
        // Unshifted voltage, even though detection ran on a +1 working copy.
        assert_relative_eq!(beat.voltage, 0.9);
    }

    #[test]
    fn test_fallback_threshold_recovers_aggressive_median() {
        // Median of [1,0,1,0,1] is 1, above the only interior maximum, so
        // the primary pass finds nothing; the 0.9 peak-to-peak retry does.
        let timestamps: Vec<f64> = (0..5).map(|i| i as f64).collect();
        let voltages = vec![1.0, 0.0, 1.0, 0.0, 1.0];
        let beats = detect(timestamps, voltages);
        assert_eq!(beats.num_beats(), 1);
        assert_relative_eq!(beats.timestamps()[0], 2.0);
    }

    #[test]
    fn test_zero_beats_is_not_an_error() {
        let timestamps: Vec<f64> = (0..5).map(|i| i as f64).collect();
        let voltages = vec![0.0, 1.0, 2.0, 3.0, 4.0]; // Monotonic, no maxima
        let beats = detect(timestamps, voltages);
        assert!(beats.is_empty());
        assert_eq!(beats.num_beats(), 0);
    }

    #[test]
    fn test_non_finite_voltage_is_rejected() {
        let signal = Signal::new(vec![0.0, 1.0, 2.0], vec![0.0, f64::NAN, 0.0]).unwrap();
        let result = BeatDetector::new(&DetectorConfig::default()).detect(&signal);
        assert!(matches!(result, Err(EcgError::InvalidPeakInput(_))));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let timestamps: Vec<f64> = (0..9).map(|i| i as f64 * 0.25).collect();
        let voltages = vec![0.0, 0.1, 1.0, 0.1, 0.0, 0.1, 1.2, 0.1, 0.0];
        let signal = Signal::new(timestamps, voltages).unwrap();
        let detector = BeatDetector::new(&DetectorConfig::default());
        let first = detector.detect(&signal).unwrap();
        let second = detector.detect(&signal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_count_in_range_is_inclusive() {
        let timestamps: Vec<f64> = (0..9).map(|i| i as f64 * 0.25).collect();
        let voltages = vec![0.0, 0.1, 1.0, 0.1, 0.0, 0.1, 1.2, 0.1, 0.0];
        let beats = detect(timestamps, voltages);
        assert_eq!(beats.count_in_range(0.5, 1.5), 2);
        assert_eq!(beats.count_in_range(0.5, 1.0), 1);
        assert_eq!(beats.count_in_range(1.6, 2.0), 0);
    }
}
