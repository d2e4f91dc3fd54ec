use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR_NAME: &str = "filey";
const SESSION_FILENAME: &str = "session.json";
const LOG_FILENAME: &str = "filey.log";

/// Get the user's home directory
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine home directory")
}

/// Default session file: `<config_dir>/filey/session.json`
///
/// - Linux: `~/.config/filey/session.json`
/// - macOS: `~/Library/Application Support/filey/session.json`
/// - Windows: `%APPDATA%\filey\session.json`
pub fn default_session_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(config_dir.join(APP_DIR_NAME).join(SESSION_FILENAME))
}

/// Default log file: `<cache_dir>/filey/filey.log`
pub fn default_log_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir().context("Failed to get platform cache directory")?;
    Ok(cache_dir.join(APP_DIR_NAME).join(LOG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_path_layout() {
        if let Ok(path) = default_session_path() {
            assert!(path.ends_with("filey/session.json"));
        }
    }

    #[test]
    fn test_default_log_path_layout() {
        if let Ok(path) = default_log_path() {
            assert!(path.ends_with("filey/filey.log"));
        }
    }

    #[test]
    fn test_home_dir_is_absolute() {
        if let Ok(home) = get_home_dir() {
            assert!(home.is_absolute());
        }
    }
}
