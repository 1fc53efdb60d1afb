//! Core library modules for the lapclock application.
//!
//! ## Features
//!
//! - **Stopwatch Core**: state machine, lap recording, lap statistics
//! - **Formatting**: clock strings and rounded seconds for display and CSV
//! - **Export**: CSV encoding, file naming, export collaborators
//! - **Interactive Session**: terminal key input, key mapping, refresh ticker,
//!   terminal view
//! - **Infrastructure**: preferences, data storage, messaging
//!
//! ## Usage
//!
//! ```rust
//! use lapclock::libs::timer::TimerStateMachine;
//! use lapclock::libs::stats::fastest_lap;
//!
//! let mut timer = TimerStateMachine::new();
//! timer.start(0);
//! timer.record_lap(1_500);
//! timer.record_lap(3_200);
//!
//! let fastest = fastest_lap(timer.laps()).map(|lap| lap.round);
//! assert_eq!(fastest, Some(1));
//! ```

pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod keymap;
pub mod lap;
pub mod messages;
pub mod session;
pub mod stats;
pub mod terminal;
pub mod ticker;
pub mod timer;
pub mod view;
