//! Folder navigation history (back/forward)

pub mod history;

pub use history::History;
