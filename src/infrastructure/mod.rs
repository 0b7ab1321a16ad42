//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the contact table, the log file and the configuration file
//! live, and expands user-supplied paths.

pub mod paths;

pub use paths::{expand_tilde, get_config_path, get_data_dir};
