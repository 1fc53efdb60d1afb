//! Session statistics derived from recorded laps.
//!
//! All functions here are pure and are recomputed on demand after every lap
//! or reset. Averages are kept at full precision and only rounded when
//! rendered.

use crate::libs::formatter::{format_seconds, format_time};
use crate::libs::lap::LapRecord;
use serde::Serialize;

/// Returns the lap with the smallest lap length.
///
/// Ties resolve to the earliest round: the scan only replaces the current
/// best on a strictly smaller value.
pub fn fastest_lap(laps: &[LapRecord]) -> Option<&LapRecord> {
    let mut laps = laps.iter();
    let mut fastest = laps.next()?;
    for lap in laps {
        if lap.lap_length < fastest.lap_length {
            fastest = lap;
        }
    }
    Some(fastest)
}

/// Mean of the raw lap durations, in seconds.
pub fn average_lap(laps: &[LapRecord]) -> Option<f64> {
    if laps.is_empty() {
        return None;
    }
    let total: u64 = laps.iter().map(|lap| lap.duration_ms).sum();
    Some(total as f64 / laps.len() as f64 / 1000.0)
}

/// Total elapsed session time in clock format.
pub fn total_time(elapsed_ms: u64) -> String {
    format_time(elapsed_ms)
}

/// Average and fastest lap of a session, as shown in the stats line and the
/// CSV header block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapSummary {
    /// Average lap length in seconds, full precision.
    pub average: f64,
    pub fastest_round: u32,
    /// Fastest lap length in seconds, 2 decimals.
    pub fastest_length: f64,
}

impl LapSummary {
    /// Builds the summary, or `None` when no lap has been recorded.
    pub fn from_laps(laps: &[LapRecord]) -> Option<Self> {
        let fastest = fastest_lap(laps)?;
        let average = average_lap(laps)?;
        Some(Self {
            average,
            fastest_round: fastest.round,
            fastest_length: fastest.lap_length,
        })
    }

    pub fn average_line(&self) -> String {
        format!("Average Lap: {} s", format_seconds(self.average))
    }

    pub fn fastest_line(&self) -> String {
        format!("Fastest Lap (Round {}): {} s", self.fastest_round, format_seconds(self.fastest_length))
    }
}

/// The three stats lines shown under the lap list.
///
/// Empty sessions show `--` placeholders.
pub fn stats_lines(laps: &[LapRecord], elapsed_ms: u64) -> [String; 3] {
    match LapSummary::from_laps(laps) {
        Some(summary) => [
            summary.fastest_line(),
            summary.average_line(),
            format!("Total Time: {}", total_time(elapsed_ms)),
        ],
        None => ["Fastest Lap: --".to_string(), "Average Lap: -- s".to_string(), "Total Time: --".to_string()],
    }
}
