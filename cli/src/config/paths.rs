//! Platform-specific path utilities for the Crest CLI.

use std::path::PathBuf;

use crate::error::{CrestError, Result};

/// Get the configuration directory for the Crest CLI.
///
/// - Linux: `~/.config/crest`
/// - macOS: `~/Library/Application Support/crest`
/// - Windows: `%APPDATA%\crest`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| CrestError::Config("Cannot determine config directory".to_string()))?;
    Ok(base.join("crest"))
}

/// Get the main configuration file path.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
