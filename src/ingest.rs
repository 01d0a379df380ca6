//! Delimited-file ingestion of ECG recordings.
//!
//! Input is a two-column CSV (timestamp, voltage), one sample per row, no
//! header. Malformed rows fail the whole import; a recording with a bad row
//! is not worth analyzing half of.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{EcgError, Result};
use crate::signal::Signal;

/// Read a recording from `path` into a [`Signal`].
///
/// The path must name an existing `.csv` file (case-insensitive extension).
/// Every row must hold exactly two numeric fields.
pub fn load_signal(path: &Path) -> Result<Signal> {
    if !path.is_file() {
        return Err(ingestion(path, "no such file"));
    }
    let has_csv_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !has_csv_extension {
        return Err(ingestion(path, "not a .csv file"));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ingestion(path, &e.to_string()))?;

    let mut timestamps = Vec::new();
    let mut voltages = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ingestion(path, &format!("row {}: {}", row + 1, e)))?;
        if record.len() != 2 {
            return Err(ingestion(
                path,
                &format!("row {}: expected 2 columns, found {}", row + 1, record.len()),
            ));
        }
        let ts: f64 = record[0].parse().map_err(|_| {
            ingestion(path, &format!("row {}: bad timestamp {:?}", row + 1, &record[0]))
        })?;
        let voltage: f64 = record[1].parse().map_err(|_| {
            ingestion(path, &format!("row {}: bad voltage {:?}", row + 1, &record[1]))
        })?;
        timestamps.push(ts);
        voltages.push(voltage);
    }

    let signal = Signal::new(timestamps, voltages)?;
    log::info!(
        "loaded {} samples from {}",
        signal.num_samples(),
        path.display()
    );
    Ok(signal)
}

fn ingestion(path: &Path, reason: &str) -> EcgError {
    EcgError::Ingestion {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
