//! Translation of terminal key presses into session actions.
//!
//! The mapping is a thin adapter in front of the state machine:
//!
//! | Key            | Action                                        |
//! |----------------|-----------------------------------------------|
//! | `Space`        | start / stop                                  |
//! | `P`            | pause / resume                                |
//! | `R`            | reset and export                              |
//! | `/`            | toggle the help overlay                       |
//! | `Escape`       | close the help overlay, or blur the title     |
//! | `Tab`          | focus the title field                         |
//! | `Shift-Tab`    | open the preferences editor                   |
//! | `Ctrl-C`       | quit                                          |
//! | anything else  | record a lap                                  |
//!
//! While the title field (or any other prompt) has focus every key is
//! swallowed, except `Enter` and `Escape` which blur it. Control characters
//! (Ctrl chords) and escape sequences the terminal could not decode never
//! record laps.

use crate::libs::timer::Command;
use console::Key;

/// What the session should do in response to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Timer(Command),
    ToggleHelp,
    CloseHelp,
    FocusTitle,
    BlurTitle,
    OpenPreferences,
    Quit,
}

/// Keyboard state: which overlay is open and whether a text field has focus.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    input_focused: bool,
    help_open: bool,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a key press to an action, updating focus and overlay state.
    ///
    /// Returns `None` for keys that are swallowed.
    pub fn translate(&mut self, key: &Key) -> Option<Action> {
        if *key == Key::CtrlC {
            return Some(Action::Quit);
        }
        if !is_command_key(key) {
            return None;
        }

        if self.input_focused {
            return match key {
                Key::Enter | Key::Escape => {
                    self.input_focused = false;
                    Some(Action::BlurTitle)
                }
                _ => None,
            };
        }

        let action = match key {
            Key::Char('/') => {
                self.help_open = !self.help_open;
                Action::ToggleHelp
            }
            Key::Escape => {
                if !self.help_open {
                    return None;
                }
                self.help_open = false;
                Action::CloseHelp
            }
            Key::Char(' ') => Action::Timer(Command::StartStop),
            Key::Char('p' | 'P') => Action::Timer(Command::PauseResume),
            Key::Char('r' | 'R') => Action::Timer(Command::Reset),
            Key::Tab => {
                self.input_focused = true;
                Action::FocusTitle
            }
            Key::BackTab => {
                self.input_focused = true;
                Action::OpenPreferences
            }
            _ => Action::Timer(Command::Lap),
        };
        Some(action)
    }

    /// Marks a text input as focused, suppressing commands until [`blur`](Self::blur).
    pub fn focus(&mut self) {
        self.input_focused = true;
    }

    pub fn blur(&mut self) {
        self.input_focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.input_focused
    }

    pub fn is_help_open(&self) -> bool {
        self.help_open
    }
}

/// Keys that may reach the command table at all.
fn is_command_key(key: &Key) -> bool {
    match key {
        Key::Unknown | Key::UnknownEscSeq(_) | Key::Alt | Key::Shift => false,
        Key::Char(c) => !c.is_control(),
        _ => true,
    }
}
