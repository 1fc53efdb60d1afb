//! Interactive stopwatch session.
//!
//! Starts reading key presses from the terminal and redraws the clock until
//! Ctrl-C. Resetting a session with laps hands them to an exporter:
//!
//! - without `--export-dir` the user is asked whether and where to save
//! - with `--export-dir` the CSV is written there under its suggested name

use crate::libs::export::{DirExporter, LapExporter, PromptExporter};
use crate::libs::session::{self, SessionOptions, DEFAULT_REFRESH_MS};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Session title, overrides the saved default
    #[arg(short, long)]
    title: Option<String>,

    /// Save exports into this directory without asking
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Clock refresh period in milliseconds
    #[arg(long, default_value_t = DEFAULT_REFRESH_MS)]
    refresh_ms: u64,
}

pub async fn cmd(args: RunArgs) -> Result<()> {
    let exporter: Arc<dyn LapExporter> = match args.export_dir {
        Some(dir) => Arc::new(DirExporter::new(dir)),
        None => Arc::new(PromptExporter::new()),
    };

    session::run(SessionOptions {
        title: args.title,
        refresh_ms: args.refresh_ms,
        exporter,
    })
    .await
}
