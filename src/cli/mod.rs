//! Command line entry point and logging setup

pub mod commands;
mod logging;

pub use commands::{Cli, Commands, run};
pub use logging::{LOG_ENV_VAR, init_logging};
