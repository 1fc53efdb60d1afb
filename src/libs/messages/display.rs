//! Display implementation for lapclock application messages.
//!
//! All user-facing text lives in this one `match`, so wording stays
//! consistent between the live session, the preferences editor and error
//! reporting. Messages with dynamic content interpolate their typed
//! parameters:
//!
//! ```rust
//! use lapclock::libs::messages::Message;
//!
//! let message = Message::ExportCompleted("LapTimes_2025-01-15_09-30-00.csv".to_string());
//! assert_eq!(message.to_string(), "Lap times saved to LapTimes_2025-01-15_09-30-00.csv");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::SessionReady => "Ready. Press Space to start, / for help.".to_string(),
            Message::SessionReset(count) => format!("Session reset, exporting {} lap(s)", count),
            Message::SessionResetEmpty => "Session reset, no laps to export".to_string(),
            Message::SessionClosed(0) => "Session closed".to_string(),
            Message::SessionClosed(count) => format!("Session closed, {} unexported lap(s) discarded", count),
            Message::TitleUpdated(title) => format!("Session title: {}", title),
            Message::TitleCleared => "Session title cleared".to_string(),
            Message::TitleEditFailed(error) => format!("Failed to edit session title: {}", error),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Lap times saved to {}", path),
            Message::ExportCancelled => "Export cancelled, lap times were not saved".to_string(),
            Message::ExportFailed(error) => format!("Failed to export lap times: {}", error),
            Message::ExportWriteFailed { path, error } => format!("Could not write {}: {}", path, error),
            Message::ExportEncodeFailed(error) => format!("Could not encode lap table: {}", error),

            // === PREFERENCES MESSAGES ===
            Message::PreferencesSaved => "Preferences saved".to_string(),
            Message::PreferencesDeleted => "Preferences deleted".to_string(),
            Message::PreferencesNotFound => "No preferences saved yet".to_string(),
            Message::PreferencesApplied => "Preferences applied".to_string(),
            Message::PreferencesLoadFailed(error) => format!("Ignoring unreadable preferences: {}", error),
            Message::PreferencesSaveFailed(error) => format!("Failed to save preferences: {}", error),
            Message::PreferencesEditorFailed(error) => format!("Preferences editor failed: {}", error),

            // === KEY INPUT MESSAGES ===
            Message::KeyReaderStopped(reason) => format!("Stopped reading keys: {}", reason),
            Message::NotATerminal => "lapclock run needs an interactive terminal".to_string(),
            Message::InputFlushFailed(error) => format!("Could not discard pending input: {}", error),

            // === HELP OVERLAY ===
            Message::HelpHeader => "Keyboard shortcuts".to_string(),
            Message::HelpStartStop => "Space    start / stop".to_string(),
            Message::HelpPauseResume => "P        pause / resume".to_string(),
            Message::HelpReset => "R        reset and export laps".to_string(),
            Message::HelpLap => "any key  record a lap".to_string(),
            Message::HelpTitle => "Tab      edit session title".to_string(),
            Message::HelpPreferences => "S-Tab    edit preferences".to_string(),
            Message::HelpToggle => "/        toggle this help (Esc closes)".to_string(),
            Message::HelpQuit => "Ctrl-C   quit".to_string(),
            Message::HelpClosed => "Help closed".to_string(),

            // === PROMPTS ===
            Message::PromptSaveLapTimes => "Save lap times?".to_string(),
            Message::PromptExportPath => "Save lap times to".to_string(),
            Message::PromptRetryExport => "Try another location?".to_string(),
            Message::PromptSessionTitle => "Session title".to_string(),
            Message::PromptPrefTitle => "Default session title".to_string(),
            Message::PromptPrefTheme => "Theme".to_string(),
            Message::PromptPrefFont => "Font".to_string(),
            Message::PromptConfirmDeletePreferences => "Delete saved preferences?".to_string(),
        };

        write!(f, "{}", text)
    }
}
