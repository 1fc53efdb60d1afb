//! Terminal rendering of the running session.
//!
//! The clock is redrawn in place on a single line. Laps, stats and the help
//! overlay are printed above it as they happen, and a lap table is printed
//! when a session is reset.

use crate::libs::config::Theme;
use crate::libs::formatter::{format_seconds, format_time};
use crate::libs::lap::{LapPace, LapRecord};
use crate::libs::messages::Message;
use crate::libs::stats::stats_lines;
use crate::libs::timer::Phase;
use prettytable::{row, Table};
use std::io::{self, Write};

const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

pub struct View {
    theme: Theme,
}

impl View {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Redraws the clock line in place.
    pub fn clock(&self, elapsed_ms: u64, phase: Phase) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "{}{} {}", CLEAR_LINE, phase_label(phase), format_time(elapsed_ms));
        let _ = out.flush();
    }

    /// Prints the session title above the clock.
    pub fn title(&self, title: &str) {
        if !title.is_empty() {
            println!("{}== {} ==", CLEAR_LINE, title);
        }
    }

    /// Prints a recorded lap followed by the refreshed stats.
    pub fn lap(&self, record: &LapRecord, laps: &[LapRecord], elapsed_ms: u64) {
        let colour = self.pace_colour(record.pace);
        println!("{}{}{}{}", CLEAR_LINE, colour, record.describe(), RESET);
        println!("  {}", stats_lines(laps, elapsed_ms).join("  |  "));
    }

    pub fn help(&self) {
        print!("{}", CLEAR_LINE);
        for message in [
            Message::HelpHeader,
            Message::HelpStartStop,
            Message::HelpPauseResume,
            Message::HelpReset,
            Message::HelpLap,
            Message::HelpTitle,
            Message::HelpPreferences,
            Message::HelpToggle,
            Message::HelpQuit,
        ] {
            println!("  {}", message);
        }
    }

    pub fn help_closed(&self) {
        println!("{}  {}", CLEAR_LINE, Message::HelpClosed);
    }

    /// Prints the laps of a finished session as a table.
    pub fn session_table(&self, laps: &[LapRecord]) {
        let mut table = Table::new();

        table.add_row(row!["ROUND", "TIMESTAMP", "DIFF (S)", "LAP (S)"]);
        for lap in laps {
            table.add_row(row![lap.round, lap.timestamp, format_seconds(lap.time_diff), format_seconds(lap.lap_length)]);
        }
        print!("{}", CLEAR_LINE);
        table.printstd();
    }

    /// Moves off the clock line so regular messages start on a fresh line.
    pub fn newline(&self) {
        println!();
    }

    fn pace_colour(&self, pace: LapPace) -> &'static str {
        match (self.theme, pace) {
            (_, LapPace::First) => "",
            (Theme::Dark, LapPace::Faster) => "\x1b[92m",
            (Theme::Dark, LapPace::Slower) => "\x1b[91m",
            (Theme::Light, LapPace::Faster) => "\x1b[32m",
            (Theme::Light, LapPace::Slower) => "\x1b[31m",
        }
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Stopped => "■",
        Phase::Running => "▶",
        Phase::Paused => "⏸",
    }
}
