//! Interactive stopwatch session.
//!
//! A session wires four event sources to the state machine on a single
//! async task:
//!
//! - **Keys**: the terminal reader thread forwards each key press and waits
//!   for the session's [`Turn`] before reading the next one
//! - **Ticks**: the [`Ticker`] refreshes the clock while the stopwatch runs
//! - **Preferences**: saved preferences arrive through the broadcast channel
//!   of [`PreferencesStore`]
//! - **Jobs**: prompts and exports run on the reader thread and report back
//!   through a channel, so the loop never waits on user input or disk
//!
//! Only the loop mutates the [`TimerStateMachine`]. While a prompt is open
//! the key map stays focused and the clock line is not redrawn.

use crate::libs::config::{Preferences, PreferencesStore};
use crate::libs::export::LapExporter;
use crate::libs::keymap::{Action, KeyMap};
use crate::libs::messages::Message;
use crate::libs::terminal::{spawn_key_reader, KeyEvent, PromptWork, Turn};
use crate::libs::ticker::Ticker;
use crate::libs::timer::{now_ms, ExportRequest, Outcome, TimerStateMachine};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_debug, msg_error, msg_info, msg_success, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;
use std::sync::{mpsc as std_mpsc, Arc};
use tokio::signal;
use tokio::sync::{broadcast, mpsc};

/// Default clock refresh period in milliseconds.
pub const DEFAULT_REFRESH_MS: u64 = 10;

/// Options for an interactive session.
pub struct SessionOptions {
    /// Session title; falls back to the saved preference.
    pub title: Option<String>,
    pub refresh_ms: u64,
    pub exporter: Arc<dyn LapExporter>,
}

/// Prompt work requested by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Export(ExportRequest),
    EditTitle(String),
    EditPreferences(Preferences),
}

/// Result of a finished job.
#[derive(Debug)]
pub enum JobDone {
    Exported(Result<Option<PathBuf>>),
    TitleEdited(Result<String>),
    PreferencesEdited(Result<()>),
}

/// Session state outside the stopwatch itself.
pub struct Session {
    timer: TimerStateMachine,
    keymap: KeyMap,
    view: View,
    preferences: Preferences,
    /// Title chosen for this session, on the command line or in the title prompt.
    title_override: Option<String>,
    prompt_active: bool,
    quit_requested: bool,
}

impl Session {
    pub fn new(preferences: Preferences, title: Option<String>) -> Self {
        let mut timer = TimerStateMachine::new();
        if let Some(title) = title.clone().or_else(|| preferences.title.clone()) {
            timer.set_title(title);
        }
        let view = View::new(preferences.theme.unwrap_or_default());
        Self {
            timer,
            keymap: KeyMap::new(),
            view,
            preferences,
            title_override: title,
            prompt_active: false,
            quit_requested: false,
        }
    }

    pub fn timer(&self) -> &TimerStateMachine {
        &self.timer
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn is_prompt_active(&self) -> bool {
        self.prompt_active
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Handles a key event. Returns the prompt job to start, if any.
    pub fn on_key(&mut self, event: KeyEvent, now: i64) -> Option<Job> {
        match event {
            KeyEvent::Press(key) => {
                let action = self.keymap.translate(&key)?;
                self.on_action(action, now)
            }
            KeyEvent::ReaderStopped(_) => None,
        }
    }

    /// Applies an action to the session. Returns the prompt job to start,
    /// if any.
    pub fn on_action(&mut self, action: Action, now: i64) -> Option<Job> {
        match action {
            Action::Timer(command) => {
                let outcome = self.timer.dispatch(command, now);
                self.on_outcome(outcome)
            }
            Action::ToggleHelp => {
                if self.keymap.is_help_open() {
                    self.view.help();
                } else {
                    self.view.help_closed();
                }
                None
            }
            Action::CloseHelp => {
                self.view.help_closed();
                None
            }
            Action::FocusTitle => {
                self.begin_prompt();
                Some(Job::EditTitle(self.timer.title().to_string()))
            }
            Action::OpenPreferences => {
                self.begin_prompt();
                Some(Job::EditPreferences(self.preferences.clone()))
            }
            Action::BlurTitle => {
                // The prompt owns focus until its job reports back.
                if self.prompt_active {
                    self.keymap.focus();
                }
                None
            }
            Action::Quit => {
                self.quit_requested = true;
                None
            }
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) -> Option<Job> {
        match outcome {
            Outcome::Lap(record) => {
                self.view.lap(&record, self.timer.laps(), self.timer.elapsed());
                None
            }
            Outcome::Reset(Some(request)) => {
                self.view.newline();
                self.view.session_table(&request.laps);
                msg_info!(Message::SessionReset(request.laps.len()));
                self.begin_prompt();
                Some(Job::Export(request))
            }
            Outcome::Reset(None) => {
                self.view.newline();
                msg_info!(Message::SessionResetEmpty);
                None
            }
            Outcome::Started | Outcome::Stopped | Outcome::Paused | Outcome::Resumed | Outcome::Ignored => None,
        }
    }

    /// Handles the result of a finished job and releases the prompt focus.
    pub fn on_job_done(&mut self, done: JobDone) {
        self.end_prompt();
        match done {
            JobDone::Exported(Ok(Some(path))) => msg_success!(Message::ExportCompleted(path.display().to_string())),
            JobDone::Exported(Ok(None)) => msg_warning!(Message::ExportCancelled),
            JobDone::Exported(Err(e)) => msg_error!(Message::ExportFailed(e.to_string())),
            JobDone::TitleEdited(Ok(title)) => {
                let title = title.trim().to_string();
                self.title_override = Some(title.clone());
                self.set_title(title);
            }
            JobDone::TitleEdited(Err(e)) => msg_error!(Message::TitleEditFailed(e.to_string())),
            JobDone::PreferencesEdited(Ok(())) => msg_success!(Message::PreferencesSaved),
            JobDone::PreferencesEdited(Err(e)) => msg_error!(Message::PreferencesEditorFailed(e.to_string())),
        }
    }

    /// Applies preferences broadcast by the store.
    ///
    /// A saved title replaces the current one. Without a saved title the
    /// session falls back to its own title, or to none.
    pub fn apply_preferences(&mut self, preferences: Preferences) {
        let title = preferences
            .title
            .clone()
            .or_else(|| self.title_override.clone())
            .unwrap_or_default();
        if title != self.timer.title() {
            self.set_title(title);
        }
        if let Some(theme) = preferences.theme {
            self.view.set_theme(theme);
        }
        self.preferences = preferences;
        msg_debug!(Message::PreferencesApplied);
    }

    /// Periodic refresh. Redraws the clock unless a prompt owns the terminal.
    pub fn on_tick(&mut self, now: i64) {
        let elapsed = self.timer.tick(now);
        if !self.prompt_active {
            self.view.clock(elapsed, self.timer.phase());
        }
    }

    fn set_title(&mut self, title: String) {
        if title.is_empty() {
            msg_info!(Message::TitleCleared);
        } else {
            msg_info!(Message::TitleUpdated(title.clone()));
        }
        self.timer.set_title(title);
    }

    fn redraw(&self) {
        if !self.prompt_active {
            self.view.clock(self.timer.elapsed(), self.timer.phase());
        }
    }

    fn begin_prompt(&mut self) {
        self.prompt_active = true;
        self.keymap.focus();
        self.view.newline();
    }

    fn end_prompt(&mut self) {
        self.prompt_active = false;
        self.keymap.blur();
    }
}

/// Runs an interactive session until Ctrl-C.
pub async fn run(options: SessionOptions) -> Result<()> {
    let store = PreferencesStore::new();
    let mut prefs_rx = store.subscribe();
    let mut session = Session::new(store.load(), options.title);
    let mut ticker = Ticker::new(options.refresh_ms);

    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    let (turn_tx, turn_rx) = std_mpsc::channel();
    spawn_key_reader(key_tx, turn_rx);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    session.view.title(session.timer.title());
    msg_info!(Message::SessionReady);
    session.redraw();

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = key_rx.recv() => {
                let event = match event {
                    Some(KeyEvent::ReaderStopped(reason)) => {
                        session.view.newline();
                        msg_bail_anyhow!(Message::KeyReaderStopped(reason));
                    }
                    None => {
                        session.view.newline();
                        msg_bail_anyhow!(Message::KeyReaderStopped("input closed".to_string()));
                    }
                    Some(event) => event,
                };
                let job = session.on_key(event, now_ms());
                if session.is_quit_requested() {
                    break;
                }
                let turn = match job {
                    Some(job) => Turn::Prompt(prompt_work(job, &store, &options.exporter, &done_tx)),
                    None => Turn::Listen,
                };
                if turn_tx.send(turn).is_err() {
                    session.view.newline();
                    msg_bail_anyhow!(Message::KeyReaderStopped("input closed".to_string()));
                }
                session.redraw();
            }
            _ = ticker.tick() => session.on_tick(now_ms()),
            Some(done) = done_rx.recv() => {
                session.on_job_done(done);
                session.redraw();
            }
            received = prefs_rx.recv() => match received {
                Ok(preferences) => {
                    session.view.newline();
                    session.apply_preferences(preferences);
                    session.redraw();
                }
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = &mut ctrl_c => break,
        }
        ticker.sync(session.timer.is_ticking());
    }

    session.view.newline();
    msg_info!(Message::SessionClosed(session.timer.laps().len()));
    Ok(())
}

/// Builds the prompt work for `job`. It runs on the reader thread and sends
/// its result to `done_tx`.
fn prompt_work(
    job: Job,
    store: &PreferencesStore,
    exporter: &Arc<dyn LapExporter>,
    done_tx: &mpsc::UnboundedSender<JobDone>,
) -> PromptWork {
    let done_tx = done_tx.clone();
    match job {
        Job::Export(request) => {
            let exporter = Arc::clone(exporter);
            Box::new(move || {
                let _ = done_tx.send(JobDone::Exported(exporter.export(&request)));
            })
        }
        Job::EditTitle(current) => Box::new(move || {
            let _ = done_tx.send(JobDone::TitleEdited(edit_title(&current)));
        }),
        Job::EditPreferences(current) => {
            let store = store.clone();
            Box::new(move || {
                let result = Preferences::edit(&current).and_then(|edited| store.save(&edited));
                let _ = done_tx.send(JobDone::PreferencesEdited(result));
            })
        }
    }
}

fn edit_title(current: &str) -> Result<String> {
    let title = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSessionTitle.to_string())
        .default(current.to_string())
        .allow_empty(true)
        .interact_text()?;
    Ok(title)
}
