//! Clipboards used by the explorer.
//!
//! - [`FileClipboard`] - In-app clipboard holding a path for copy and paste
//! - [`copy_path_to_clipboard`] - Puts a path on the system clipboard as text

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Maximum clipboard size (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Path remembered by the copy command, consumed by paste
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileClipboard {
    path: Option<PathBuf>,
}

impl FileClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether there is something to paste that still exists on disk
    pub fn can_paste(&self) -> bool {
        self.path.as_deref().is_some_and(Path::exists)
    }

    pub fn clear(&mut self) {
        self.path = None;
    }
}

/// Trait for system clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Validates clipboard text without accessing system clipboard
fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

fn copy_with_provider(path: &Path, provider: &mut dyn ClipboardProvider) -> Result<()> {
    let text = path.to_string_lossy();
    validate_clipboard_text(&text)?;
    provider.set_text(&text)
}

/// Copy a path to the system clipboard as text.
///
/// # Errors
/// Returns error if:
/// - The path is empty
/// - The clipboard is locked by another process or access is denied
/// - No system clipboard is available (headless environment)
pub fn copy_path_to_clipboard(path: &Path) -> Result<()> {
    // Validate first, before initializing clipboard
    validate_clipboard_text(&path.to_string_lossy())?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(path, &mut clipboard)
}
