//! Per-user application data directory.
//!
//! - **Windows**: `%LOCALAPPDATA%\lapclock\lapclock`
//! - **macOS**: `~/Library/Application Support/lapclock/lapclock`
//! - **Linux**: `~/.local/share/lapclock/lapclock`

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const VENDOR_NAME: &str = "lapclock";
pub const APP_NAME: &str = "lapclock";

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME);

        Self { base_path }
    }

    /// Path of `file_name` inside the data directory, creating the directory
    /// when it does not exist yet.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }

    /// Path of `file_name` without touching the filesystem.
    pub fn peek_path(&self, file_name: &str) -> PathBuf {
        self.base_path.join(file_name)
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// The user's desktop directory, used as the default export location.
///
/// Falls back to the current directory when no home directory is known or
/// the desktop directory does not exist.
pub fn desktop_dir() -> PathBuf {
    let home = match OS {
        "windows" => var("USERPROFILE"),
        _ => var("HOME"),
    };
    match home {
        Ok(home) => {
            let desktop = Path::new(&home).join("Desktop");
            if desktop.is_dir() {
                desktop
            } else {
                PathBuf::from(".")
            }
        }
        Err(_) => PathBuf::from("."),
    }
}
