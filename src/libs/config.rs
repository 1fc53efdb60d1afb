//! User preferences for the lapclock application.
//!
//! Preferences are a flat key-value record persisted across sessions:
//!
//! - **title**: default session title shown above the clock and written into
//!   CSV exports
//! - **theme**: `"dark"` or `"light"`, selects the lap colour palette
//! - **font**: free-form font name, kept for hosts that render text
//!
//! ## Storage
//!
//! The record is stored as pretty-printed JSON in `preferences.json` inside
//! the per-user data directory (see [`DataStorage`]). Absent keys are
//! omitted from the file.
//!
//! ## Error Handling
//!
//! Loading never fails: a missing, unreadable or malformed file yields the
//! empty record. Saving reports errors to the caller.
//!
//! ## Broadcast
//!
//! [`PreferencesStore`] writes the record and then broadcasts it to every
//! subscriber, so a running session picks up new preferences as soon as the
//! editor saves them.
//!
//! ```rust,no_run
//! use lapclock::libs::config::{Preferences, PreferencesStore, Theme};
//!
//! let store = PreferencesStore::new();
//! let mut updates = store.subscribe();
//!
//! let mut prefs = Preferences::read();
//! prefs.theme = Some(Theme::Light);
//! store.save(&prefs)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use tokio::sync::broadcast;

/// Preferences file name inside the data directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Font offered first by the preferences editor.
pub const DEFAULT_FONT: &str = "monospace";

const BROADCAST_CAPACITY: usize = 16;

/// Colour theme of the session view.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// Flat preferences record. Every key is optional.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl Preferences {
    /// Reads preferences from the data directory.
    ///
    /// Returns the empty record when the file is missing or cannot be parsed.
    /// The failure is only visible in debug mode.
    pub fn read() -> Preferences {
        match Self::try_read() {
            Ok(prefs) => prefs,
            Err(e) => {
                msg_debug!(Message::PreferencesLoadFailed(e.to_string()));
                Preferences::default()
            }
        }
    }

    fn try_read() -> Result<Preferences> {
        let path = DataStorage::new().peek_path(PREFERENCES_FILE_NAME);
        if !path.exists() {
            return Ok(Preferences::default());
        }
        let prefs_str = fs::read_to_string(path)?;
        let prefs: Preferences = serde_json::from_str(&prefs_str)?;
        Ok(prefs)
    }

    /// Writes the record as pretty-printed JSON, creating the data
    /// directory when needed.
    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(PREFERENCES_FILE_NAME)?;
        let file = File::create(path)?;
        serde_json::to_writer_pretty(&file, &self)?;
        Ok(())
    }

    /// Removes the preferences file. Returns `false` when there was none.
    pub fn delete() -> Result<bool> {
        let path = DataStorage::new().peek_path(PREFERENCES_FILE_NAME);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// Runs the interactive preferences editor, pre-filled with `current`.
    ///
    /// An empty title or font answer removes that key.
    pub fn edit(current: &Preferences) -> Result<Preferences> {
        let theme = ColorfulTheme::default();

        let title: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptPrefTitle.to_string())
            .default(current.title.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        let current_theme = current.theme.unwrap_or_default();
        let theme_index = Select::with_theme(&theme)
            .with_prompt(Message::PromptPrefTheme.to_string())
            .items(&Theme::ALL)
            .default(Theme::ALL.iter().position(|t| *t == current_theme).unwrap_or(0))
            .interact()?;

        let font: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptPrefFont.to_string())
            .default(current.font.clone().unwrap_or_else(|| DEFAULT_FONT.to_string()))
            .allow_empty(true)
            .interact_text()?;

        Ok(Preferences {
            title: non_empty(title),
            theme: Some(Theme::ALL[theme_index]),
            font: non_empty(font),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Saves preferences and broadcasts every saved record to subscribers.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    sender: broadcast::Sender<Preferences>,
}

impl PreferencesStore {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Preferences> {
        self.sender.subscribe()
    }

    pub fn load(&self) -> Preferences {
        Preferences::read()
    }

    /// Persists `prefs` and notifies all subscribers.
    ///
    /// Having no subscribers is not an error.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        prefs.save()?;
        let _ = self.sender.send(prefs.clone());
        Ok(())
    }
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}
