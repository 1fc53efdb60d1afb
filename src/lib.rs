//! # Lapclock - Keyboard-Driven Lap Timer
//!
//! A terminal stopwatch that records laps from key presses in its terminal, keeps
//! running lap statistics and exports finished sessions to CSV.
//!
//! ## Features
//!
//! - **Stopwatch**: start, stop, pause and resume with millisecond precision
//! - **Laps**: any unbound key records a lap with its difference to the
//!   previous one
//! - **Statistics**: fastest lap, average lap and total time after every lap
//! - **CSV Export**: a finished session can be saved when it is reset
//! - **Preferences**: default title and theme, persisted across sessions
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lapclock::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
