#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    SessionReady,
    SessionReset(usize), // exported lap count
    SessionResetEmpty,
    SessionClosed(usize), // discarded lap count
    TitleUpdated(String),
    TitleCleared,
    TitleEditFailed(String), // error

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    ExportCancelled,
    ExportFailed(String), // error
    ExportWriteFailed { path: String, error: String },
    ExportEncodeFailed(String), // error

    // === PREFERENCES MESSAGES ===
    PreferencesSaved,
    PreferencesDeleted,
    PreferencesNotFound,
    PreferencesApplied,
    PreferencesLoadFailed(String), // error
    PreferencesSaveFailed(String), // error
    PreferencesEditorFailed(String), // error

    // === KEY INPUT MESSAGES ===
    KeyReaderStopped(String), // reason
    NotATerminal,
    InputFlushFailed(String), // error

    // === HELP OVERLAY ===
    HelpHeader,
    HelpStartStop,
    HelpPauseResume,
    HelpReset,
    HelpLap,
    HelpTitle,
    HelpPreferences,
    HelpToggle,
    HelpQuit,
    HelpClosed,

    // === PROMPTS ===
    PromptSaveLapTimes,
    PromptExportPath,
    PromptRetryExport,
    PromptSessionTitle,
    PromptPrefTitle,
    PromptPrefTheme,
    PromptPrefFont,
    PromptConfirmDeletePreferences,
}
