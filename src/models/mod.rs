//! Data models shared across the explorer.
//!
//! - [`DirEntry`] - One file or folder in a listing
//! - [`Listing`] - A scanned directory with its ordered entries
//! - [`AnimationType`] - Transition style applied when a listing loads

pub mod animation;
pub mod entry;

pub use animation::{
    ANIMATION_DURATIONS_MS, AnimationType, DEFAULT_ANIMATION_DURATION_MS, next_duration,
};
pub use entry::{DirEntry, EntryKind, Listing};
