//! In-folder search over the current listing

pub mod filter;

pub use filter::{MAX_QUERY_LEN, SearchMode, filter_entries, filter_indices};
