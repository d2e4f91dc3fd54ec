//! Filesystem adapter for the explorer.
//!
//! - [`listing`] - Directory scans and the background scan worker
//! - [`ops`] - Create, rename, delete, paste, move and open
//! - [`preview`] - Folder peeks and file details for the preview pane
//! - [`error`] - Typed errors for mutations

pub mod error;
pub mod listing;
pub mod ops;
pub mod preview;

pub use error::{FsError, FsResult};
pub use listing::{DirectoryLoader, LoadResult, list_directory, sort_entries};
pub use ops::{
    MoveReport, create_file, create_folder, delete_entry, drop_target, move_entries,
    open_with_system, paste_entry, rename_entry, unique_copy_path, validate_entry_name,
};
pub use preview::{PEEK_LIMIT, Preview, folder_peek, preview_for};
