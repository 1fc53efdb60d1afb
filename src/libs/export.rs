//! CSV export of finished sessions.
//!
//! When a session with recorded laps is reset, the state machine hands an
//! [`ExportRequest`] to an export collaborator. This module provides the CSV
//! formatting and the collaborators that decide where the file goes.
//!
//! ## CSV Layout
//!
//! ```text
//! Session Title: Morning intervals
//! Average Lap: 1.60 s
//! Fastest Lap (Round 1): 1.50 s
//!
//! Round,Timestamp,Time Difference (s),Lap Length (s)
//! 1,00:01.500,0.00,1.50
//! 2,00:03.200,0.20,1.70
//! ```
//!
//! The header block is plain text. Fields are never quoted, so a title or
//! timestamp containing a comma produces a row that does not split cleanly.
//!
//! ## File Naming
//!
//! Suggested names are derived from the session start:
//! `LapTimes_2025-01-15_09-30-00.csv`.
//!
//! ## Collaborators
//!
//! - [`PromptExporter`]: asks for confirmation and a destination path, and
//!   offers another location when the write fails
//! - [`DirExporter`]: writes straight into a fixed directory
//!
//! ```rust,no_run
//! use lapclock::libs::export::{DirExporter, LapExporter};
//! use lapclock::libs::timer::TimerStateMachine;
//!
//! let mut timer = TimerStateMachine::new();
//! timer.start(0);
//! timer.record_lap(1_500);
//! if let Some(request) = timer.reset() {
//!     let saved = DirExporter::new("exports").export(&request)?;
//!     println!("{:?}", saved);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::data_storage::desktop_dir;
use crate::libs::formatter::format_seconds;
use crate::libs::lap::LapRecord;
use crate::libs::messages::Message;
use crate::libs::stats::LapSummary;
use crate::libs::timer::ExportRequest;
use crate::msg_error;
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Column headers of the lap table.
pub const CSV_HEADERS: [&str; 4] = ["Round", "Timestamp", "Time Difference (s)", "Lap Length (s)"];

/// Errors produced while turning a session into a CSV file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not encode lap table: {0}")]
    Encode(#[from] csv::Error),

    #[error("could not finish lap table: {0}")]
    Buffer(String),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn to_message(&self) -> Message {
        match self {
            ExportError::Encode(e) => Message::ExportEncodeFailed(e.to_string()),
            ExportError::Buffer(e) => Message::ExportEncodeFailed(e.clone()),
            ExportError::Write { path, source } => Message::ExportWriteFailed {
                path: path.display().to_string(),
                error: source.to_string(),
            },
        }
    }
}

/// Serializes laps into CSV text with the session header block.
///
/// The average and fastest lap lines are only written when `summary` is
/// given.
pub fn to_csv(laps: &[LapRecord], title: &str, summary: Option<&LapSummary>) -> Result<String, ExportError> {
    let mut out = format!("Session Title: {}\n", title);
    if let Some(summary) = summary {
        out.push_str(&summary.average_line());
        out.push('\n');
        out.push_str(&summary.fastest_line());
        out.push('\n');
    }
    out.push('\n');

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADERS)?;
    for lap in laps {
        wtr.write_record(&[
            lap.round.to_string(),
            lap.timestamp.clone(),
            format_seconds(lap.time_diff),
            format_seconds(lap.lap_length),
        ])?;
    }

    let table = wtr.into_inner().map_err(|e| ExportError::Buffer(e.error().to_string()))?;
    out.push_str(&String::from_utf8_lossy(&table));
    Ok(out)
}

/// CSV text for an export request, including the summary lines.
pub fn request_to_csv(request: &ExportRequest) -> Result<String, ExportError> {
    let summary = LapSummary::from_laps(&request.laps);
    to_csv(&request.laps, &request.title, summary.as_ref())
}

/// Suggested file name for a session that started at `start_epoch`
/// (epoch milliseconds), rendered in the given time zone.
pub fn suggested_file_name<Tz>(start_epoch: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = DateTime::<Utc>::from_timestamp_millis(start_epoch).unwrap_or_default();
    format!("LapTimes_{}.csv", start.with_timezone(tz).format("%Y-%m-%d_%H-%M-%S"))
}

/// Writes the CSV for `request` to `path` in a single write.
pub fn write_csv(path: &Path, request: &ExportRequest) -> Result<(), ExportError> {
    let content = request_to_csv(request)?;
    fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), laps = request.laps.len(), "lap times exported");
    Ok(())
}

/// An export collaborator.
///
/// Returns the written path, or `None` when the user cancelled.
pub trait LapExporter: Send + Sync {
    fn export(&self, request: &ExportRequest) -> Result<Option<PathBuf>>;
}

/// Writes every export into a fixed directory under its suggested name.
#[derive(Debug, Clone)]
pub struct DirExporter {
    dir: PathBuf,
}

impl DirExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LapExporter for DirExporter {
    fn export(&self, request: &ExportRequest) -> Result<Option<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(suggested_file_name(request.start_epoch, &chrono::Local));
        write_csv(&path, request)?;
        Ok(Some(path))
    }
}

/// Writes `request` to a path chosen by `choose_path`, offering a retry
/// after each failed write.
///
/// `choose_path` receives the proposed path: `default_path` first, then the
/// path that just failed. A failed write is reported once; when `retry`
/// declines, the export ends without saving and `Ok(None)` is returned.
pub fn save_with_retry<P, R>(
    request: &ExportRequest,
    default_path: PathBuf,
    mut choose_path: P,
    mut retry: R,
) -> Result<Option<PathBuf>>
where
    P: FnMut(&Path) -> Result<PathBuf>,
    R: FnMut() -> Result<bool>,
{
    let mut proposed = default_path;
    loop {
        let path = choose_path(&proposed)?;
        match write_csv(&path, request) {
            Ok(()) => return Ok(Some(path)),
            Err(e) => {
                msg_error!(e.to_message());
                if !retry()? {
                    return Ok(None);
                }
                proposed = path;
            }
        }
    }
}

/// Asks the user whether and where to save the lap times.
///
/// The default destination is the desktop directory joined with the
/// suggested file name. A failed write is reported and the user may pick
/// another location; declining ends the export without saving.
#[derive(Debug, Clone, Default)]
pub struct PromptExporter;

impl PromptExporter {
    pub fn new() -> Self {
        Self
    }
}

impl LapExporter for PromptExporter {
    fn export(&self, request: &ExportRequest) -> Result<Option<PathBuf>> {
        let theme = ColorfulTheme::default();

        let save = Confirm::with_theme(&theme)
            .with_prompt(Message::PromptSaveLapTimes.to_string())
            .default(true)
            .interact()?;
        if !save {
            return Ok(None);
        }

        let default_path = desktop_dir().join(suggested_file_name(request.start_epoch, &chrono::Local));
        save_with_retry(
            request,
            default_path,
            |proposed| {
                let answer: String = Input::with_theme(&theme)
                    .with_prompt(Message::PromptExportPath.to_string())
                    .default(proposed.display().to_string())
                    .interact_text()?;
                Ok(PathBuf::from(answer.trim()))
            },
            || {
                let retry = Confirm::with_theme(&theme)
                    .with_prompt(Message::PromptRetryExport.to_string())
                    .default(true)
                    .interact()?;
                Ok(retry)
            },
        )
    }
}
