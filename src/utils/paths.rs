use std::borrow::Cow;
use std::env;
use std::path::{Component, Path, PathBuf};

const SIZE_UNITS: [&str; 8] = ["", "K", "M", "G", "T", "P", "E", "Z"];

/// One navigable segment of the breadcrumb bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub path: PathBuf,
}

/// Splits a path into breadcrumb segments, root first
///
/// Every crumb carries the full path up to and including its segment, so jumping
/// to a crumb is a plain navigation to `crumb.path`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use filey::utils::breadcrumbs;
///
/// let crumbs = breadcrumbs(Path::new("/home/alice"));
/// let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
/// assert_eq!(labels, ["/", "home", "alice"]);
/// assert_eq!(crumbs[1].path, PathBuf::from("/home"));
/// ```
pub fn breadcrumbs(path: &Path) -> Vec<Crumb> {
    let mut crumbs: Vec<Crumb> = Vec::new();
    let mut current = PathBuf::new();
    let mut last_was_prefix = false;

    for component in path.components() {
        current.push(component.as_os_str());
        match component {
            Component::Prefix(prefix) => {
                crumbs.push(Crumb {
                    label: prefix.as_os_str().to_string_lossy().into_owned(),
                    path: current.clone(),
                });
                last_was_prefix = true;
                continue;
            }
            Component::RootDir => {
                // Drive prefix and root separator form a single crumb ("C:\")
                if last_was_prefix && let Some(last) = crumbs.last_mut() {
                    last.label.push(std::path::MAIN_SEPARATOR);
                    last.path = current.clone();
                } else {
                    crumbs.push(Crumb {
                        label: std::path::MAIN_SEPARATOR.to_string(),
                        path: current.clone(),
                    });
                }
            }
            Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => {
                crumbs.push(Crumb {
                    label: component.as_os_str().to_string_lossy().into_owned(),
                    path: current.clone(),
                });
            }
        }
        last_was_prefix = false;
    }

    crumbs
}

/// Formats a byte count the way the list view shows file sizes
///
/// # Examples
///
/// ```
/// use filey::utils::format_size;
///
/// assert_eq!(format_size(512), "512.0 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut num = bytes as f64;
    for unit in SIZE_UNITS {
        if num < 1024.0 {
            return format!("{:3.1} {}B", num, unit);
        }
        num /= 1024.0;
    }
    format!("{:.1} YB", num)
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use filey::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Documents");
/// // Returns "~/Documents" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&Path>) -> String {
    let home_from_env = env::var_os("HOME").map(PathBuf::from).or_else(dirs::home_dir);
    let home = home_override.or(home_from_env.as_deref());

    // Component-wise so /home/al never matches /home/alice
    if let Some(home) = home
        && !home.as_os_str().is_empty()
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", std::path::MAIN_SEPARATOR, rest.to_string_lossy());
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
