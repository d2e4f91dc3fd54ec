//! filey - keyboard-driven file explorer for the terminal
//!
//! This library holds everything behind the `filey` binary:
//!
//! - Scanning folders off the UI thread, folders first
//! - Create, rename, delete, copy/paste and moving entries between folders
//! - Back/forward history and breadcrumb navigation
//! - Substring and fuzzy search within a folder
//! - Themes, listing transitions and a session file that survives restarts
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use filey::list_directory;
//!
//! let listing = list_directory(Path::new("/tmp"))?;
//! for entry in &listing.entries {
//!     println!("{}", entry.display_label());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod fsops;
pub mod models;
pub mod nav;
pub mod search;
pub mod session;
pub mod theme;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use fsops::{FsError, list_directory};
pub use models::{DirEntry, EntryKind, Listing};
pub use nav::History;
pub use search::{SearchMode, filter_entries};
pub use session::{Session, SessionStore};
pub use utils::paths::{breadcrumbs, format_path_with_tilde};
