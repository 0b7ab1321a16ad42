//! Filesystem locations used by the phonebook.
//!
//! Data and configuration live in the platform directories reported by
//! `directories` (`~/.local/share/phonebook` and `~/.config/phonebook` on
//! Linux). When no home directory can be determined, everything falls back to
//! `./.phonebook` so the program still runs in bare environments.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Default contact table file name inside the data directory.
pub const CONTACTS_FILE: &str = "contacts.json";

/// Default log file name inside the data directory.
pub const LOG_FILE: &str = "phonebook.log";

/// Default configuration file name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "phonebook", "phonebook")
}

fn fallback_dir() -> PathBuf {
    PathBuf::from(".phonebook")
}

/// Returns the directory holding the contact table and the log file.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    project_dirs().map_or_else(fallback_dir, |dirs| dirs.data_dir().to_path_buf())
}

/// Returns the path of the optional configuration file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    project_dirs().map_or_else(
        || fallback_dir().join(CONFIG_FILE),
        |dirs| dirs.config_dir().join(CONFIG_FILE),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use phonebook::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path").to_str(), Some("/absolute/path"));
/// assert!(!expand_tilde("~/contacts.json").starts_with("~"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()) else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
