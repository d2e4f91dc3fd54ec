//! Session persistence
//!
//! The session remembers the last folder, animation settings and theme between runs.
//! It is stored as pretty JSON:
//!
//! ```json
//! {
//!   "last_path": "/home/alice/projects",
//!   "anim_duration": 200,
//!   "anim_type": "Fade",
//!   "theme": { "background": "#1e1e1e", "text": "#dddddd", ... }
//! }
//! ```
//!
//! Location: `<config_dir>/filey/session.json`
//! - Linux: `~/.config/filey/session.json`
//! - macOS: `~/Library/Application Support/filey/session.json`
//! - Windows: `%APPDATA%\filey\session.json`

pub mod persistence;
pub mod state;

pub use persistence::SessionStore;
pub use state::Session;
