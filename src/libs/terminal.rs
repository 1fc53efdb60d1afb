//! Key input from the session's own terminal.
//!
//! Only keys typed into the terminal running lapclock reach the stopwatch.
//! A single reader thread owns terminal input:
//!
//! ```text
//! reader thread                         session loop
//! ─────────────                         ────────────
//! read_key() ──── KeyEvent::Press ────▶ on_key()
//!            ◀─────── Turn ──────────── Listen | Prompt(work)
//! Prompt: discard pending input, run work() (dialoguer prompt)
//! ```
//!
//! The reader waits for a [`Turn`] after every key, and prompts run on the
//! reader thread itself, so nothing else reads the terminal while a prompt
//! is open. Keys typed before the prompt appears are discarded instead of
//! answering it.

use crate::libs::messages::Message;
use crate::msg_debug;
use console::{Key, Term};
use std::io;
use std::sync::mpsc::Receiver;
use tokio::sync::mpsc::UnboundedSender;

/// Prompt work handed to the reader thread.
pub type PromptWork = Box<dyn FnOnce() + Send>;

/// The session's answer to a key press.
pub enum Turn {
    /// Read the next key.
    Listen,
    /// Discard pending input, then run the prompt before reading again.
    Prompt(PromptWork),
}

/// Events produced by the reader thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Press(Key),
    /// The terminal can no longer be read. Carries the reason.
    ReaderStopped(String),
}

/// Where keys come from.
pub trait KeySource {
    /// Blocks until the next key press.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Drops input that was typed but not read yet.
    fn discard_pending(&mut self) -> io::Result<()>;
}

/// Reads keys from the controlling terminal without echo.
pub struct TerminalKeys {
    term: Term,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self { term: Term::stderr() }
    }

    pub fn is_attended(&self) -> bool {
        self.term.is_term()
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        // Raw read: Ctrl-C arrives as `Key::CtrlC` instead of a signal.
        self.term.read_key_raw()
    }

    fn discard_pending(&mut self) -> io::Result<()> {
        discard_pending_input()
    }
}

/// Flushes the terminal's pending input queue.
///
/// Uses stdin when it is a terminal and `/dev/tty` otherwise, the same
/// device keys are read from.
#[cfg(unix)]
pub fn discard_pending_input() -> io::Result<()> {
    use nix::sys::termios::{tcflush, FlushArg};
    use std::io::IsTerminal;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return tcflush(stdin, FlushArg::TCIFLUSH).map_err(io::Error::from);
    }
    let tty = std::fs::OpenOptions::new().read(true).open("/dev/tty")?;
    tcflush(&tty, FlushArg::TCIFLUSH).map_err(io::Error::from)
}

/// Flushes the console input buffer.
#[cfg(windows)]
pub fn discard_pending_input() -> io::Result<()> {
    use winapi::um::processenv::GetStdHandle;
    use winapi::um::winbase::STD_INPUT_HANDLE;
    use winapi::um::wincon::FlushConsoleInputBuffer;

    let flushed = unsafe { FlushConsoleInputBuffer(GetStdHandle(STD_INPUT_HANDLE)) };
    if flushed == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// Reader loop: forwards each key and waits for the session's [`Turn`].
///
/// Returns when the source fails (after reporting
/// [`KeyEvent::ReaderStopped`]) or when either channel is closed.
pub fn read_keys<S: KeySource>(mut source: S, keys: UnboundedSender<KeyEvent>, turns: Receiver<Turn>) {
    loop {
        let key = match source.read_key() {
            Ok(key) => key,
            Err(e) => {
                let _ = keys.send(KeyEvent::ReaderStopped(e.to_string()));
                return;
            }
        };
        if keys.send(KeyEvent::Press(key)).is_err() {
            return;
        }

        match turns.recv() {
            Ok(Turn::Listen) => {}
            Ok(Turn::Prompt(work)) => {
                if let Err(e) = source.discard_pending() {
                    msg_debug!(Message::InputFlushFailed(e.to_string()));
                }
                work();
            }
            Err(_) => return,
        }
    }
}

/// Starts the reader thread on the controlling terminal.
pub fn spawn_key_reader(keys: UnboundedSender<KeyEvent>, turns: Receiver<Turn>) {
    std::thread::spawn(move || {
        let source = TerminalKeys::new();
        if !source.is_attended() {
            let _ = keys.send(KeyEvent::ReaderStopped(Message::NotATerminal.to_string()));
            return;
        }
        read_keys(source, keys, turns);
    });
}
