//! Interactive explorer
//!
//! - `app`: state, event handling and the draw loop
//! - `events`: key to action mapping per input mode
//! - `rendering` / `layout`: drawing with ratatui
//! - `animation`: listing transitions
//! - `terminal`: raw mode and alternate screen guard

mod animation;
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::{App, AppConfig};
use terminal::TerminalManager;

/// Run the interactive explorer until the user quits
pub fn run_interactive(config: AppConfig) -> Result<()> {
    let mut manager = TerminalManager::new()?;

    let mut app = App::new(config);
    let res = app.run(manager.terminal_mut());

    // Restore first so an error from the loop is printed on the normal screen
    manager.restore()?;
    tracing::info!(last_path = %app.current_dir().display(), "explorer closed");

    res
}
