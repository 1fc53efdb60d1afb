//! Preferences management command.
//!
//! Without flags the interactive editor runs and the result is saved. A
//! running session picks the saved record up on its next start.

use crate::libs::config::{Preferences, PreferencesStore};
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct PrefsArgs {
    /// Print the saved preferences as JSON
    #[arg(long, conflicts_with = "delete")]
    show: bool,

    /// Delete the saved preferences
    #[arg(long)]
    delete: bool,
}

pub fn cmd(args: PrefsArgs) -> Result<()> {
    if args.show {
        return show();
    }
    if args.delete {
        return delete();
    }

    let store = PreferencesStore::new();
    let edited = Preferences::edit(&store.load())?;
    store
        .save(&edited)
        .map_err(|e| msg_error_anyhow!(Message::PreferencesSaveFailed(e.to_string())))?;
    msg_success!(Message::PreferencesSaved);
    Ok(())
}

fn show() -> Result<()> {
    let prefs = Preferences::read();
    if prefs == Preferences::default() {
        msg_info!(Message::PreferencesNotFound);
        return Ok(());
    }
    msg_print!(serde_json::to_string_pretty(&prefs)?);
    Ok(())
}

fn delete() -> Result<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptConfirmDeletePreferences.to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    if Preferences::delete()? {
        msg_success!(Message::PreferencesDeleted);
    } else {
        msg_warning!(Message::PreferencesNotFound);
    }
    Ok(())
}
