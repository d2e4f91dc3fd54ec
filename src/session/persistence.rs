//! Session file persistence with atomic writes

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::state::Session;
use crate::utils::default_session_path;

/// Reads and writes the session file at a fixed location
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location (`<config_dir>/filey/session.json`)
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session
    ///
    /// Returns `Ok(None)` when no session has been saved yet. A file that is not
    /// valid JSON is logged and replaced by defaults rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self, home: &Path) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;

        let session = match serde_json::from_str::<serde_json::Value>(&contents) {
            Ok(value) => Session::from_json_lenient(&value, home),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file is not valid JSON, using defaults");
                Session::new(home)
            }
        };

        Ok(Some(session))
    }

    /// Save the session atomically (temp file + rename)
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create session directory")?;
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session.json".to_string());
        let temp_path = self.path.with_file_name(format!("{}.tmp", file_name));

        let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        fs::write(&temp_path, json).context("Failed to write session temp file")?;
        fs::rename(&temp_path, &self.path).context("Failed to rename session temp file")?;

        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}
