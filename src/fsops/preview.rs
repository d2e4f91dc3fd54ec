//! Preview pane data: a peek into folders and details for files

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::models::{DirEntry, EntryKind};

/// Number of child names shown when peeking into a folder
pub const PEEK_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Folder {
        path: PathBuf,
        /// `None` when the folder cannot be read
        peek: Option<String>,
    },
    File {
        path: PathBuf,
        size: Option<u64>,
        modified: Option<DateTime<Utc>>,
    },
}

/// Build the preview for the entry under the cursor
pub fn preview_for(entry: &DirEntry) -> Preview {
    match entry.kind {
        EntryKind::Folder => {
            Preview::Folder { path: entry.path.clone(), peek: folder_peek(&entry.path) }
        }
        EntryKind::File => Preview::File {
            path: entry.path.clone(),
            size: entry.size,
            modified: entry.modified,
        },
    }
}

/// Names of the first few visible children of `dir`, comma separated
///
/// Runs on the UI thread, so reading stops as soon as one name past
/// [`PEEK_LIMIT`] has been seen. The names shown are the first ones the filesystem
/// returns, sorted for display. Hidden names (leading `.`) are left out. A trailing
/// `", ..."` marks that more children exist than are shown. Returns `None` when
/// `dir` cannot be read.
pub fn folder_peek(dir: &Path) -> Option<String> {
    let read_dir = fs::read_dir(dir).ok()?;

    let mut names: Vec<String> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .take(PEEK_LIMIT + 1)
        .collect();

    let more = names.len() > PEEK_LIMIT;
    names.truncate(PEEK_LIMIT);
    names.sort_by_key(|name| name.to_lowercase());

    let mut peek = names.join(", ");
    if more {
        peek.push_str(", ...");
    }
    Some(peek)
}
