use std::path::{Path, PathBuf};

/// Back/forward stack of visited folders
///
/// `index` always points into `entries` when it is `Some`, and is `None` only
/// while nothing has been visited yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<PathBuf>,
    index: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit, dropping any forward entries
    ///
    /// Visiting the folder that is already current leaves the history untouched.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.current() == Some(path.as_path()) {
            return;
        }

        if let Some(idx) = self.index {
            self.entries.truncate(idx + 1);
        }
        self.entries.push(path);
        self.index = Some(self.entries.len() - 1);
    }

    /// Step back; returns the new current folder
    pub fn back(&mut self) -> Option<&Path> {
        match self.index {
            Some(idx) if idx > 0 => {
                self.index = Some(idx - 1);
                self.current()
            }
            _ => None,
        }
    }

    /// Step forward; returns the new current folder
    pub fn forward(&mut self) -> Option<&Path> {
        match self.index {
            Some(idx) if idx + 1 < self.entries.len() => {
                self.index = Some(idx + 1);
                self.current()
            }
            _ => None,
        }
    }

    /// Folder one step back, without moving
    pub fn peek_back(&self) -> Option<&Path> {
        let idx = self.index?.checked_sub(1)?;
        self.entries.get(idx).map(PathBuf::as_path)
    }

    /// Folder one step forward, without moving
    pub fn peek_forward(&self) -> Option<&Path> {
        self.entries.get(self.index? + 1).map(PathBuf::as_path)
    }

    pub fn current(&self) -> Option<&Path> {
        self.entries.get(self.index?).map(PathBuf::as_path)
    }

    pub fn can_go_back(&self) -> bool {
        self.peek_back().is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.peek_forward().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}
