//! Synthetic ECG fixtures shared by the integration tests.

use std::io::Write;
use std::path::Path;

/// Number of beats placed in the known recording.
pub const KNOWN_NUM_BEATS: usize = 35;

/// Build a recording with fully known ground truth: 1112 samples at 40 Hz
/// (27.775 s span), 35 R-peaks of 1.05 V each followed by a -0.68 V dip,
/// flat baseline elsewhere.
///
/// Expected analysis: extremes (-0.68, 1.05), duration 27.775, 35 beats,
/// whole-recording mean rate 35 / (27.775 / 60) ~= 75.6076 BPM.
pub fn known_recording() -> (Vec<f64>, Vec<f64>) {
    const NUM_SAMPLES: usize = 1112;
    const DT: f64 = 0.025;

    let timestamps: Vec<f64> = (0..NUM_SAMPLES).map(|i| i as f64 * DT).collect();
    let mut voltages = vec![0.0; NUM_SAMPLES];
    for beat in 0..KNOWN_NUM_BEATS {
        let idx = 15 + beat * 31;
        voltages[idx - 1] = 0.2;
        voltages[idx] = 1.05;
        voltages[idx + 1] = 0.2;
        voltages[idx + 2] = -0.68;
    }
    (timestamps, voltages)
}

/// Write a two-column CSV the way a recorder would emit it.
pub fn write_csv(path: &Path, timestamps: &[f64], voltages: &[f64]) {
    let mut file = std::fs::File::create(path).expect("create fixture csv");
    for (ts, v) in timestamps.iter().zip(voltages.iter()) {
        writeln!(file, "{},{}", ts, v).expect("write fixture row");
    }
}
