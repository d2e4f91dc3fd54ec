use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::format_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Folder,
    File,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Byte size for files; `None` for folders or unreadable metadata
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

impl DirEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Human readable size, empty for folders
    pub fn size_text(&self) -> String {
        match (self.kind, self.size) {
            (EntryKind::File, Some(bytes)) => format_size(bytes),
            _ => String::new(),
        }
    }

    /// Label used by the list view and `filey list`
    pub fn display_label(&self) -> String {
        let size = self.size_text();
        if size.is_empty() { self.name.clone() } else { format!("{} ({})", self.name, size) }
    }
}

/// Result of scanning one directory
#[derive(Debug, Clone)]
pub struct Listing {
    pub dir: PathBuf,
    pub entries: Vec<DirEntry>,
    pub elapsed: Duration,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
