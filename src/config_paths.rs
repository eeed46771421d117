//! Where ember-ui keeps its config, user themes and logs
//!
//! Everything sits under one directory: `$XDG_CONFIG_HOME/ember-ui` or
//! `~/.config/ember-ui` on Unix, `%APPDATA%\ember-ui` on Windows.

use std::path::PathBuf;
use std::{env, fs};

use anyhow::{Context, Result};

const APP_DIR: &str = "ember-ui";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "ember.log";

pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|base| base.join(APP_DIR))
}

/// User themes, searched before the built-in ones
pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the log directory if needed
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let dir = logs_dir().context("No config directory available")?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    Ok(dir)
}
