//! Heart-rate derivation over an optionally bounded time range.
//!
//! Range bounds are clamped, not rejected: a caller asking for a window
//! outside the recording gets the whole-recording rate, with the
//! substitution logged. Only non-finite inputs to the low-level helpers
//! are errors.

use crate::error::{EcgError, Result};
use crate::signal::Signal;

use super::beats::BeatSet;

/// True iff `ts` lies within the recording's time extent, inclusive at
/// both ends. NaN is never valid.
pub fn is_valid_timestamp(signal: &Signal, ts: f64) -> bool {
    signal.min_ts() <= ts && ts <= signal.max_ts()
}

/// Fraction of one minute spanned by `[start_ts, end_ts]`.
pub fn percentage_of_minute(start_ts: f64, end_ts: f64) -> Result<f64> {
    if !start_ts.is_finite() || !end_ts.is_finite() {
        return Err(EcgError::InvalidRange(format!(
            "non-finite bounds {start_ts}..{end_ts}"
        )));
    }
    Ok((end_ts - start_ts) / 60.0)
}

/// Beats per minute for `beat_count` beats over the given fraction of a
/// minute. A zero-width range is rejected rather than propagating an
/// infinite rate.
pub fn bpm(beat_count: usize, percentage_of_minute: f64) -> Result<f64> {
    if !percentage_of_minute.is_finite() {
        return Err(EcgError::InvalidRange(format!(
            "non-finite percentage of minute {percentage_of_minute}"
        )));
    }
    if percentage_of_minute == 0.0 {
        return Err(EcgError::ZeroRange);
    }
    Ok(beat_count as f64 / percentage_of_minute)
}

/// Mean heart rate over `[start_ts, end_ts]`, both ends inclusive.
///
/// An omitted or out-of-range bound falls back to the corresponding
/// recording extreme (logged). Beat detection is not re-run: the range
/// only re-filters `beat_set`. A resolved range with `end < start` is not
/// rejected; the negative result propagates to the caller.
pub fn mean_hr_bpm(
    beat_set: &BeatSet,
    signal: &Signal,
    start_ts: Option<f64>,
    end_ts: Option<f64>,
) -> Result<f64> {
    let start = resolve_bound(start_ts, signal.min_ts(), signal, "start_ts");
    let end = resolve_bound(end_ts, signal.max_ts(), signal, "end_ts");
    if end < start {
        log::warn!("reversed range {start}..{end}, rate will be negative");
    }
    let beats_in_range = beat_set.count_in_range(start, end);
    log::debug!("{beats_in_range} beats in range {start}..{end}");
    bpm(beats_in_range, percentage_of_minute(start, end)?)
}

fn resolve_bound(requested: Option<f64>, fallback: f64, signal: &Signal, name: &str) -> f64 {
    match requested {
        Some(ts) if is_valid_timestamp(signal, ts) => ts,
        Some(ts) => {
            log::warn!(
                "{name} {ts} outside recording [{}, {}], using {fallback}",
                signal.min_ts(),
                signal.max_ts()
            );
            fallback
        }
        None => fallback,
    }
}
