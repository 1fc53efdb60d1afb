//! Command-line interface for lapclock.
//!
//! - **run**: start an interactive stopwatch session
//! - **prefs**: show, edit or delete saved preferences

pub mod prefs;
pub mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Start an interactive stopwatch session")]
    Run(run::RunArgs),
    #[command(about = "Show, edit or delete saved preferences")]
    Prefs(prefs::PrefsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Run(args) => run::cmd(args).await,
            Commands::Prefs(args) => prefs::cmd(args),
        }
    }
}
