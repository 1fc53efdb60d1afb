//! Lap records and the recorder that produces them.
//!
//! A lap is the interval between two consecutive lap-boundary events. The
//! [`LapRecorder`] keeps the ordered list of recorded laps together with the
//! next round number, and derives for each new lap its rounded length, the
//! signed difference to the previous lap and a pace classification.
//!
//! ## Invariants
//!
//! - `next_round() == laps().len() + 1` after every operation
//! - Records are append-only; once created a [`LapRecord`] never changes
//! - Differences are computed on raw millisecond durations, never on the
//!   rounded display values
//!
//! ## Usage
//!
//! ```rust
//! use lapclock::libs::lap::LapRecorder;
//!
//! let mut recorder = LapRecorder::new();
//! let first = recorder.record_lap(1_500, 1_500);
//! let second = recorder.record_lap(1_700, 3_200);
//!
//! assert_eq!(first.round, 1);
//! assert_eq!(second.lap_length, 1.7);
//! assert_eq!(second.time_diff, 0.2);
//! assert_eq!(recorder.next_round(), 3);
//! ```

use crate::libs::formatter::{format_seconds, format_signed_diff, format_time, ms_to_rounded_seconds};
use serde::{Deserialize, Serialize};

/// How a lap compares to the one recorded before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LapPace {
    /// The first lap of a session has nothing to compare against.
    First,
    /// Strictly shorter than the previous lap.
    Faster,
    /// Equal to or longer than the previous lap.
    Slower,
}

/// A single recorded lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// 1-based round number.
    pub round: u32,
    /// Total elapsed time at the moment the lap was recorded.
    pub timestamp: String,
    /// Signed difference to the previous lap in seconds, 2 decimals. Zero for the first lap.
    pub time_diff: f64,
    /// Lap length in seconds, 2 decimals.
    pub lap_length: f64,
    /// Raw lap duration in milliseconds.
    pub duration_ms: u64,
    pub pace: LapPace,
}

impl LapRecord {
    /// One-line description used by the terminal view.
    ///
    /// `Round 2: 00:03.200 (+0.20s) [1.70s]`; the difference is omitted for
    /// the first lap.
    pub fn describe(&self) -> String {
        match self.pace {
            LapPace::First => format!("Round {}: {} [{}s]", self.round, self.timestamp, format_seconds(self.lap_length)),
            _ => format!(
                "Round {}: {} ({}) [{}s]",
                self.round,
                self.timestamp,
                format_signed_diff(self.time_diff, self.pace == LapPace::Faster),
                format_seconds(self.lap_length)
            ),
        }
    }
}

/// Owns the lap sequence of a session.
#[derive(Debug, Clone, Default)]
pub struct LapRecorder {
    laps: Vec<LapRecord>,
}

impl LapRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new lap and returns a copy of the created record.
    ///
    /// # Arguments
    ///
    /// * `duration_ms` - Length of the lap that just ended
    /// * `elapsed_ms` - Total session elapsed time at the lap moment
    pub fn record_lap(&mut self, duration_ms: u64, elapsed_ms: u64) -> LapRecord {
        let (time_diff, pace) = match self.laps.last() {
            None => (0.0, LapPace::First),
            Some(previous) => {
                let delta = duration_ms as i64 - previous.duration_ms as i64;
                let pace = if delta < 0 { LapPace::Faster } else { LapPace::Slower };
                (ms_to_rounded_seconds(delta), pace)
            }
        };

        let record = LapRecord {
            round: self.next_round(),
            timestamp: format_time(elapsed_ms),
            time_diff,
            lap_length: ms_to_rounded_seconds(duration_ms as i64),
            duration_ms,
            pace,
        };

        self.laps.push(record.clone());
        record
    }

    /// Round number the next recorded lap will receive.
    pub fn next_round(&self) -> u32 {
        self.laps.len() as u32 + 1
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Removes all laps and returns them, restarting the round counter at 1.
    pub fn take(&mut self) -> Vec<LapRecord> {
        std::mem::take(&mut self.laps)
    }
}
