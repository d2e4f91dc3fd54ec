use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::utils::default_log_path;

/// Environment variable holding the log filter (`info` when unset)
pub const LOG_ENV_VAR: &str = "FILEY_LOG";

/// Send tracing output to `path`, or to the default log file
///
/// The terminal belongs to the explorer, so logs only ever go to a file. Returns
/// the file being written, or `None` when it could not be opened; the program
/// then runs without logging.
pub fn init_logging(path: Option<&Path>) -> Option<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok()?,
    };
    let file = open_log_file(&path).ok()?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("filey.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filey.log");
        fs::write(&path, "earlier\n").unwrap();

        drop(open_log_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "earlier\n");
    }

    #[test]
    fn test_unopenable_log_file_disables_logging() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        // Parent is a regular file, so the log cannot be created
        assert_eq!(init_logging(Some(&blocker.join("filey.log"))), None);
    }
}
