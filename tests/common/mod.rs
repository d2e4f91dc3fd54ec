//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Builder for creating test folder trees
pub struct TreeBuilder {
    temp_dir: TempDir,
}

impl TreeBuilder {
    /// Create a new builder over an empty temp directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the root of the tree
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a folder (parents are created as needed)
    pub fn with_folder(self, relative: &str) -> Self {
        fs::create_dir_all(self.temp_dir.path().join(relative)).expect("Failed to create folder");
        self
    }

    /// Add a file with the given content (parents are created as needed)
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent folder");
        }
        fs::write(path, content).expect("Failed to write file");
        self
    }

    /// Add a file of `len` zero bytes
    pub fn with_sized_file(self, relative: &str, len: usize) -> Self {
        let path = self.temp_dir.path().join(relative);
        fs::write(path, vec![0u8; len]).expect("Failed to write file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A small project-like tree:
///
/// ```text
/// docs/            guide.md, notes.txt
/// src/             main.rs, lib.rs
/// Assets/          (empty)
/// Cargo.toml       2048 bytes
/// README.md
/// .hidden
/// ```
pub fn project_tree() -> TempDir {
    TreeBuilder::new()
        .with_file("docs/guide.md", "# Guide")
        .with_file("docs/notes.txt", "notes")
        .with_file("src/main.rs", "fn main() {}")
        .with_file("src/lib.rs", "")
        .with_folder("Assets")
        .with_sized_file("Cargo.toml", 2048)
        .with_file("README.md", "# Readme")
        .with_file(".hidden", "secret")
        .build()
}

/// Names of a listing in display order
pub fn names(listing: &filey::Listing) -> Vec<String> {
    listing.entries.iter().map(|e| e.name.clone()).collect()
}
