use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use super::logging::init_logging;
use crate::fsops::list_directory;
use crate::search::{SearchMode, filter_entries};
use crate::session::{Session, SessionStore};
use crate::tui::{AppConfig, run_interactive};
use crate::utils::{format_path_with_tilde, get_home_dir, sanitize_display_name};

#[derive(Parser)]
#[command(name = "filey")]
#[command(version)]
#[command(about = "Keyboard-driven file explorer for the terminal", long_about = None)]
pub struct Cli {
    /// Folder to open (defaults to the folder visited last)
    pub path: Option<PathBuf>,

    /// Session file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub session_file: Option<PathBuf>,

    /// Neither read nor write the session file
    #[arg(long, global = true, conflicts_with = "session_file")]
    pub no_session: bool,

    /// Log file (defaults to <cache dir>/filey/filey.log)
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a folder listing, folders first
    List {
        /// Folder to list (defaults to the working directory)
        path: Option<PathBuf>,

        /// Only show entries matching this search
        #[arg(short, long)]
        query: Option<String>,

        /// Fuzzy matching instead of substring matching
        #[arg(short, long)]
        fuzzy: bool,
    },
    /// Show where the session is stored and what it holds
    Session,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(cli.log_file.as_deref());
    tracing::debug!(log = ?log_path, "logging initialised");

    match &cli.command {
        Some(Commands::List { path, query, fuzzy }) => {
            list_folder(path.as_deref(), query.as_deref(), *fuzzy)?;
        }
        Some(Commands::Session) => {
            show_session(&cli)?;
        }
        None => {
            explore(&cli)?;
        }
    }

    Ok(())
}

/// Session store selected by the flags; `None` with `--no-session`
fn session_store(cli: &Cli) -> Option<SessionStore> {
    if cli.no_session {
        return None;
    }
    match &cli.session_file {
        Some(path) => Some(SessionStore::new(path)),
        None => match SessionStore::at_default_location() {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "no session location, running without a session");
                None
            }
        },
    }
}

/// Absolute form of a folder given on the command line
fn resolve_dir(path: &Path) -> Result<PathBuf> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Directory not found: {}", path.display()))?;
    if !dir.is_dir() {
        bail!("Not a directory: {}", path.display());
    }
    Ok(dir)
}

fn explore(cli: &Cli) -> Result<()> {
    let home = get_home_dir()?;
    let store = session_store(cli);

    let session = match &store {
        Some(store) => match store.load(&home) {
            Ok(saved) => saved.unwrap_or_else(|| Session::new(&home)),
            Err(e) => {
                tracing::warn!(error = %e, "could not read session, using defaults");
                Session::new(&home)
            }
        },
        None => Session::new(&home),
    };

    let start_dir = match &cli.path {
        Some(path) => resolve_dir(path)?,
        None => session.last_path.clone(),
    };

    tracing::info!(
        start = %start_dir.display(),
        session = ?store.as_ref().map(|s| s.path().to_path_buf()),
        "starting explorer"
    );
    run_interactive(AppConfig { start_dir, session, store })
}

fn list_folder(path: Option<&Path>, query: Option<&str>, fuzzy: bool) -> Result<()> {
    let dir = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("Failed to read working directory")?,
    };
    let listing = list_directory(&dir)?;
    let mode = if fuzzy { SearchMode::Fuzzy } else { SearchMode::Substring };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in filter_entries(&listing.entries, query.unwrap_or(""), mode) {
        let label = sanitize_display_name(&entry.display_label());
        if entry.is_folder() {
            writeln!(out, "{}/", label)?;
        } else {
            writeln!(out, "{}", label)?;
        }
    }

    tracing::info!(dir = %dir.display(), entries = listing.len(), "listed folder");
    Ok(())
}

fn show_session(cli: &Cli) -> Result<()> {
    let Some(store) = session_store(cli) else {
        println!("Session persistence disabled (--no-session)");
        return Ok(());
    };

    println!("Session file: {}", format_path_with_tilde(store.path()));

    let home = get_home_dir()?;
    match store.load(&home)? {
        Some(session) => {
            let json = serde_json::to_string_pretty(&session).context("Failed to serialize session")?;
            println!("{}", json);
        }
        None => println!("No session saved yet"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_path_argument() {
        let cli = Cli::try_parse_from(["filey", "/tmp"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("/tmp")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_list_subcommand() {
        let cli = Cli::try_parse_from(["filey", "list", "src", "--query", "rs", "--fuzzy"]).unwrap();
        match cli.command {
            Some(Commands::List { path, query, fuzzy }) => {
                assert_eq!(path, Some(PathBuf::from("src")));
                assert_eq!(query.as_deref(), Some("rs"));
                assert!(fuzzy);
            }
            _ => panic!("expected list subcommand"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["filey", "session", "--session-file", "s.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Session)));
        assert_eq!(cli.session_file, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn test_no_session_conflicts_with_session_file() {
        assert!(Cli::try_parse_from(["filey", "--no-session", "--session-file", "s.json"]).is_err());
    }

    #[test]
    fn test_session_store_selection() {
        let cli = Cli::try_parse_from(["filey", "--no-session"]).unwrap();
        assert!(session_store(&cli).is_none());

        let cli = Cli::try_parse_from(["filey", "--session-file", "custom.json"]).unwrap();
        assert_eq!(session_store(&cli).unwrap().path(), Path::new("custom.json"));
    }

    #[test]
    fn test_resolve_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(resolve_dir(dir.path()).unwrap().is_absolute());
        assert!(resolve_dir(&file).unwrap_err().to_string().contains("Not a directory"));
        let err = resolve_dir(&dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("Directory not found"));
    }
}
