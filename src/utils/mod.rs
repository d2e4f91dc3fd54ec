pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{default_log_path, default_session_path, get_home_dir};
pub use paths::{Crumb, breadcrumbs, format_path_with_tilde, format_size};
pub use terminal::sanitize_display_name;
