//! Stopwatch state machine.
//!
//! [`TimerStateMachine`] owns the whole session state: the current phase,
//! the epochs used for elapsed-time accounting and the recorded laps. The
//! host never touches these fields directly; it dispatches [`Command`]s and
//! reads the state back through accessors.
//!
//! ## Phases
//!
//! ```text
//!            start                pause
//!  Stopped ────────▶ Running ─────────────▶ Paused
//!     ▲                │  ▲      pause        │
//!     │     start      │  └───────────────────┘
//!     └────────────────┘                      │
//!     ▲                  start                │
//!     └───────────────────────────────────────┘
//!
//!  reset: any phase ──▶ Stopped (laps cleared)
//! ```
//!
//! ## Time Source
//!
//! Every operation takes the current wall-clock time as epoch milliseconds.
//! The machine never reads a clock itself, which keeps it deterministic; the
//! application passes [`now_ms`].
//!
//! ## Pause Compensation
//!
//! While paused the start and lap-start epochs stay frozen. Resuming shifts
//! both forward by the pause duration, so neither the elapsed time nor the
//! current lap includes the time spent paused.

use crate::libs::lap::{LapRecord, LapRecorder};
use chrono::Utc;
use tracing::debug;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Elapsed time since `start_epoch`, clamped at zero.
pub fn elapsed_ms(now: i64, start_epoch: i64) -> u64 {
    now.saturating_sub(start_epoch).max(0) as u64
}

/// Mutually exclusive session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Running,
    Paused,
}

/// Discrete commands accepted by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start/stop toggle.
    StartStop,
    /// Pause/resume toggle.
    PauseResume,
    Lap,
    Reset,
}

/// Everything an export collaborator needs to save a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub laps: Vec<LapRecord>,
    /// Logical session start in epoch milliseconds.
    pub start_epoch: i64,
    pub title: String,
}

/// Result of dispatching a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Started,
    Stopped,
    Paused,
    Resumed,
    Lap(LapRecord),
    /// The session was cleared. Carries the export request when laps existed.
    Reset(Option<ExportRequest>),
    /// The command is not valid in the current phase.
    Ignored,
}

/// Session state, owned exclusively by the state machine.
#[derive(Debug, Clone)]
struct SessionState {
    phase: Phase,
    start_epoch: i64,
    pause_start_epoch: Option<i64>,
    lap_start_epoch: i64,
    elapsed_ms: u64,
    laps: LapRecorder,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Stopped,
            start_epoch: 0,
            pause_start_epoch: None,
            lap_start_epoch: 0,
            elapsed_ms: 0,
            laps: LapRecorder::new(),
        }
    }
}

/// The stopwatch state machine.
#[derive(Debug, Clone, Default)]
pub struct TimerStateMachine {
    state: SessionState,
    title: String,
}

impl TimerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a command to the matching operation.
    pub fn dispatch(&mut self, command: Command, now: i64) -> Outcome {
        match command {
            Command::StartStop => self.start(now),
            Command::PauseResume => self.pause(now),
            Command::Lap => self.record_lap(now).map_or(Outcome::Ignored, Outcome::Lap),
            Command::Reset => Outcome::Reset(self.reset()),
        }
    }

    /// Start/stop toggle.
    ///
    /// From `Stopped` the session continues from the accumulated elapsed
    /// time and the lap boundary moves to the logical start. From `Running`
    /// or `Paused` the session stops and the elapsed time is frozen.
    pub fn start(&mut self, now: i64) -> Outcome {
        let state = &mut self.state;
        match state.phase {
            Phase::Stopped => {
                state.start_epoch = now - state.elapsed_ms as i64;
                state.lap_start_epoch = state.start_epoch;
                state.phase = Phase::Running;
                debug!(start_epoch = state.start_epoch, elapsed_ms = state.elapsed_ms, "stopwatch started");
                Outcome::Started
            }
            Phase::Running => {
                state.elapsed_ms = elapsed_ms(now, state.start_epoch);
                state.phase = Phase::Stopped;
                debug!(elapsed_ms = state.elapsed_ms, "stopwatch stopped");
                Outcome::Stopped
            }
            Phase::Paused => {
                // Elapsed time was frozen when the pause began.
                state.pause_start_epoch = None;
                state.phase = Phase::Stopped;
                debug!(elapsed_ms = state.elapsed_ms, "stopwatch stopped while paused");
                Outcome::Stopped
            }
        }
    }

    /// Pause/resume toggle. Ignored while stopped.
    pub fn pause(&mut self, now: i64) -> Outcome {
        let state = &mut self.state;
        match state.phase {
            Phase::Stopped => Outcome::Ignored,
            Phase::Running => {
                state.elapsed_ms = elapsed_ms(now, state.start_epoch);
                state.pause_start_epoch = Some(now);
                state.phase = Phase::Paused;
                debug!(elapsed_ms = state.elapsed_ms, "stopwatch paused");
                Outcome::Paused
            }
            Phase::Paused => {
                let pause_start = state.pause_start_epoch.take().unwrap_or(now);
                let pause_duration = (now - pause_start).max(0);
                state.start_epoch += pause_duration;
                state.lap_start_epoch += pause_duration;
                state.phase = Phase::Running;
                debug!(pause_duration, "stopwatch resumed");
                Outcome::Resumed
            }
        }
    }

    /// Records a lap. Only valid while running; a paused or stopped session
    /// returns `None`.
    pub fn record_lap(&mut self, now: i64) -> Option<LapRecord> {
        let state = &mut self.state;
        if state.phase != Phase::Running {
            return None;
        }

        let duration = elapsed_ms(now, state.lap_start_epoch);
        state.lap_start_epoch = now;
        state.elapsed_ms = elapsed_ms(now, state.start_epoch);

        let record = state.laps.record_lap(duration, state.elapsed_ms);
        debug!(round = record.round, duration_ms = record.duration_ms, "lap recorded");
        Some(record)
    }

    /// Clears the session and returns to `Stopped`.
    ///
    /// Returns an export request when at least one lap was recorded. The
    /// laps are cleared regardless of what happens to the export.
    pub fn reset(&mut self) -> Option<ExportRequest> {
        let mut previous = std::mem::take(&mut self.state);
        let laps = previous.laps.take();
        debug!(laps = laps.len(), "stopwatch reset");

        if laps.is_empty() {
            return None;
        }
        Some(ExportRequest {
            laps,
            start_epoch: previous.start_epoch,
            title: self.title.clone(),
        })
    }

    /// Periodic refresh. Recomputes the cached elapsed time while running and
    /// returns it.
    pub fn tick(&mut self, now: i64) -> u64 {
        if self.state.phase == Phase::Running {
            self.state.elapsed_ms = elapsed_ms(now, self.state.start_epoch);
        }
        self.state.elapsed_ms
    }

    /// Whether the periodic refresh should be active.
    pub fn is_ticking(&self) -> bool {
        self.state.phase == Phase::Running
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Last computed elapsed time.
    pub fn elapsed(&self) -> u64 {
        self.state.elapsed_ms
    }

    pub fn start_epoch(&self) -> i64 {
        self.state.start_epoch
    }

    pub fn laps(&self) -> &[LapRecord] {
        self.state.laps.laps()
    }

    /// Round number of the next lap.
    pub fn round_counter(&self) -> u32 {
        self.state.laps.next_round()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_ms_clamps_negative() {
        assert_eq!(elapsed_ms(100, 200), 0);
        assert_eq!(elapsed_ms(250, 200), 50);
    }

    #[test]
    fn test_tick_does_not_advance_when_paused() {
        let mut timer = TimerStateMachine::new();
        timer.start(0);
        assert_eq!(timer.tick(400), 400);
        timer.pause(500);
        assert_eq!(timer.tick(9_000), 500);
    }
}
