//! Directory scanning and the background scan worker.
//!
//! [`list_directory`] is the synchronous scan used by the CLI and by tests. The TUI
//! never calls it on the UI thread; it goes through [`DirectoryLoader`], whose single
//! worker thread runs the scans and hands results back over a channel.
//!
//! # Ordering
//!
//! Folders come first, then files. Each group is sorted case-insensitively by name,
//! with the raw name as tie breaker so the order is total and stable.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::models::{DirEntry, EntryKind, Listing};

/// Scan `dir` and return its folders and files in display order
///
/// Symlinks are followed. Entries that resolve to neither a directory nor a
/// regular file (broken links, sockets, devices) are skipped.
///
/// # Errors
///
/// Returns an error if `dir` does not exist, is not a directory, or cannot be read.
/// Individual entries whose metadata cannot be read are skipped.
pub fn list_directory(dir: &Path) -> Result<Listing> {
    let started = Instant::now();

    if !dir.exists() {
        bail!("Directory not found: {}", dir.display());
    }
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let read_dir =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let paths: Vec<PathBuf> = read_dir.filter_map(|entry| entry.ok().map(|e| e.path())).collect();

    let mut entries: Vec<DirEntry> = paths.into_par_iter().filter_map(classify).collect();
    sort_entries(&mut entries);

    Ok(Listing { dir: dir.to_path_buf(), entries, elapsed: started.elapsed() })
}

/// Stat a single path (following symlinks) into a [`DirEntry`]
fn classify(path: PathBuf) -> Option<DirEntry> {
    let metadata = fs::metadata(&path).ok()?;
    let name = path.file_name()?.to_string_lossy().into_owned();
    let modified = metadata.modified().ok().map(DateTime::<Utc>::from);

    if metadata.is_dir() {
        Some(DirEntry { name, path, kind: EntryKind::Folder, size: None, modified })
    } else if metadata.is_file() {
        Some(DirEntry { name, path, kind: EntryKind::File, size: Some(metadata.len()), modified })
    } else {
        None
    }
}

/// Folders first, then files, each case-insensitive by name
pub fn sort_entries(entries: &mut [DirEntry]) {
    entries.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// A finished scan tagged with the request that produced it
#[derive(Debug)]
pub struct LoadResult {
    pub generation: u64,
    pub dir: PathBuf,
    pub outcome: Result<Listing>,
}

/// One queued scan
#[derive(Debug)]
struct ScanRequest {
    generation: u64,
    dir: PathBuf,
}

/// Background scan worker
///
/// A single long-lived thread serves every [`request`](DirectoryLoader::request).
/// Requests queued while a scan runs collapse to the newest one, so at most one scan
/// is in flight and rapid navigation never piles up work. Results are tagged with the
/// request's generation and anything older than the latest request is discarded on
/// receipt. The worker exits when the loader is dropped.
pub struct DirectoryLoader {
    requests: Sender<ScanRequest>,
    rx: Receiver<LoadResult>,
    generation: u64,
}

impl DirectoryLoader {
    pub fn new() -> Self {
        let (requests, request_rx) = mpsc::channel();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || scan_worker(request_rx, tx));
        Self { requests, rx, generation: 0 }
    }

    /// Generation of the most recent request
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queue a scan of `dir` for the worker thread
    pub fn request(&mut self, dir: &Path) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let dir = dir.to_path_buf();

        tracing::debug!(generation, dir = %dir.display(), "scan requested");
        if self.requests.send(ScanRequest { generation, dir }).is_err() {
            tracing::warn!(generation, "scan worker has stopped");
        }

        generation
    }

    /// Latest finished scan, if any, without blocking
    pub fn try_recv(&self) -> Option<LoadResult> {
        loop {
            match self.rx.try_recv() {
                Ok(result) if result.generation == self.generation => return Some(result),
                Ok(stale) => {
                    tracing::debug!(generation = stale.generation, "dropping stale scan");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Wait up to `timeout` for the latest scan to finish
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadResult> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(result) if result.generation == self.generation => return Some(result),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve scan requests until the loader goes away
fn scan_worker(requests: Receiver<ScanRequest>, results: Sender<LoadResult>) {
    while let Ok(mut request) = requests.recv() {
        // Only the newest queued request is worth scanning
        while let Ok(newer) = requests.try_recv() {
            tracing::debug!(generation = request.generation, "skipping superseded scan");
            request = newer;
        }

        let ScanRequest { generation, dir } = request;
        let outcome = list_directory(&dir);
        if let Ok(listing) = &outcome {
            tracing::debug!(
                generation,
                entries = listing.len(),
                elapsed_ms = listing.elapsed.as_secs_f64() * 1000.0,
                "loaded {} items",
                listing.len()
            );
        }
        if results.send(LoadResult { generation, dir, outcome }).is_err() {
            break;
        }
    }
}
