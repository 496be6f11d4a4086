//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/guarantee-check/`
//! - macOS: `~/Library/Application Support/guarantee-check/`
//! - Windows: `%APPDATA%\guarantee-check\`

use std::path::PathBuf;

/// Application name used for config lookups
const APP_NAME: &str = "guarantee-check";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
