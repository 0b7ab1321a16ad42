//! Phonebook: a contact book with favorites, search and paging.
//!
//! The crate keeps a session-local set of favorite contacts on top of a remote
//! contact service and presents one merged list: favorites first, then one
//! page of everybody else.
//!
//! - Favorites are flagged locally and never written to the service
//! - A single search predicate filters both sections
//! - Paging applies to the non-favorite section only
//! - Reads go through a result cache that is invalidated after every write
//! - Out-of-order read completions are discarded by generation

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line-oriented front end (main.rs)                  │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Favorites and paging stores                      │
//! │  - Read generations and list merging                │
//! │  - Event handling and action execution              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Remote Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (remote/)     │   │ (worker/)     │
//! │ - Rendering   │   │ - Query cache │   │ - Protocol    │
//! │ - Theming     │   │ - Transport   │   │ - Validation  │
//! │ - Components  │   │ - Client      │   │ - Storage I/O │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//!                                         ┌───────────────┐
//!                                         │ Storage Layer │
//!                                         │ (storage/)    │
//!                                         └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Stores, list coordinator, event handler and runtime
//! - [`domain`]: Contacts, search patterns and errors
//! - [`infrastructure`]: Platform paths
//! - [`remote`]: Cached client for the contact service
//! - [`storage`]: JSON and in-memory contact tables
//! - [`worker`]: Service side of the contact protocol
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: Logging to a rotating file
//!
//! # Configuration
//!
//! Settings are read from `config.toml` in the platform config directory and
//! may be overridden by `PHONEBOOK_*` environment variables:
//!
//! ```toml
//! data_file = "~/contacts.json"
//! storage = "json"
//! page_size = 10
//! theme = "phonebook-light"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use phonebook::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::SetSearch("ann".into()))?;
//! assert!(matches!(actions[..], [Action::Fetch(_)]));
//! # Ok::<(), phonebook::PhonebookError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod remote;
pub mod storage;
pub mod worker;

pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Runtime};
pub use domain::{PhonebookError, Result};
pub use ui::Theme;

use app::pagination::DEFAULT_PAGE_SIZE;
use infrastructure::paths::{CONTACTS_FILE, LOG_FILE};
use infrastructure::{expand_tilde, get_data_dir};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use storage::{JsonStorage, MemoryStorage, Storage};

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "PHONEBOOK_";

/// Backend holding the contact table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageKind {
    /// JSON file on disk.
    #[default]
    Json,
    /// Process-local table, lost on exit.
    Memory,
}

impl FromStr for StorageKind {
    type Err = PhonebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "memory" => Ok(Self::Memory),
            other => Err(PhonebookError::Config(format!("unknown storage backend: {other}"))),
        }
    }
}

/// Runtime configuration.
///
/// Every field has a usable default; unknown keys and unparsable values are
/// ignored with a debug log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the JSON contact table.
    ///
    /// Supports a leading `~`. Default: `contacts.json` in the data directory.
    pub data_file: Option<String>,

    /// Backend for the contact table. Default: [`StorageKind::Json`]
    pub storage: StorageKind,

    /// Number of non-favorite contacts per page. Default: 10
    pub page_size: usize,

    /// Built-in theme name to use.
    ///
    /// Options: `phonebook-dark`, `phonebook-light`. Ignored if `theme_file`
    /// is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Log level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Path of the log file. Default: `phonebook.log` in the data directory.
    pub log_file: Option<String>,

    /// Emit ANSI colors. Default: `true`
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            storage: StorageKind::Json,
            page_size: DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            log_file: None,
            color: true,
        }
    }
}

impl Config {
    /// Parses configuration from a flat key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `data_file`, `theme_file`, `log_file`: path strings (empty means unset)
    /// - `storage`: `json` or `memory` (falls back to `json`)
    /// - `page_size`: positive integer (falls back to 10)
    /// - `theme`: built-in theme name
    /// - `trace_level`: level filter string
    /// - `color`: `true`/`false` (falls back to `true`)
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use phonebook::{Config, StorageKind};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("storage".to_string(), "memory".to_string());
    /// map.insert("page_size".to_string(), "25".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.storage, StorageKind::Memory);
    /// assert_eq!(config.page_size, 25);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let storage = config
            .get("storage")
            .and_then(|s| {
                s.parse::<StorageKind>()
                    .map_err(|e| tracing::debug!(error = %e, "ignoring storage setting"))
                    .ok()
            })
            .unwrap_or_default();

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let color = config
            .get("color")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(true);

        Self {
            data_file: text("data_file"),
            storage,
            page_size,
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
            log_file: text("log_file"),
            color,
        }
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Config`] if the file cannot be read or is not
    /// valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_map(&read_table(path.as_ref())?))
    }

    /// Reads `path` if it exists and applies `PHONEBOOK_*` overrides from `vars`.
    ///
    /// A missing file is not an error. Variable names are matched without the
    /// prefix and case-insensitively, so `PHONEBOOK_PAGE_SIZE` sets `page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Config`] if the file exists but cannot be read
    /// or parsed.
    pub fn load<I>(path: &Path, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = if path.exists() {
            read_table(path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            BTreeMap::new()
        };

        for (key, value) in vars {
            if let Some(name) = key.strip_prefix(ENV_PREFIX) {
                map.insert(name.to_ascii_lowercase(), value);
            }
        }

        Ok(Self::from_map(&map))
    }

    /// Resolved path of the JSON contact table.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .as_deref()
            .map_or_else(|| get_data_dir().join(CONTACTS_FILE), expand_tilde)
    }

    /// Resolved path of the log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .as_deref()
            .map_or_else(|| get_data_dir().join(LOG_FILE), expand_tilde)
    }
}

fn read_table(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        PhonebookError::Config(format!("failed to read config file {}: {e}", path.display()))
    })?;
    let table: toml::Table = toml::from_str(&contents)
        .map_err(|e| PhonebookError::Config(format!("failed to parse config TOML: {e}")))?;

    Ok(table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

/// Creates the application state for `config`.
///
/// The theme comes from `theme_file`, then `theme_name`, then the default;
/// a theme that fails to load falls back to the default.
///
/// # Example
///
/// ```rust
/// use phonebook::{initialize, Config};
///
/// let config = Config {
///     theme_name: Some("phonebook-light".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.theme.name, "phonebook-light");
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(page_size = config.page_size, "initializing phonebook");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.page_size, theme)
}

/// Opens the contact table selected by `config`.
///
/// # Errors
///
/// Returns an error if the JSON file cannot be created or parsed.
pub fn open_storage(config: &Config) -> Result<Box<dyn Storage>> {
    match config.storage {
        StorageKind::Json => {
            let path = config.data_file();
            tracing::info!(path = %path.display(), "opening contact table");
            Ok(Box::new(JsonStorage::new(path)?))
        }
        StorageKind::Memory => {
            tracing::info!("using in-memory contact table");
            Ok(Box::new(MemoryStorage::new()))
        }
    }
}
