//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with a rotating log file.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters events by level (`RUST_LOG` wins over `config.trace_level`,
///    which defaults to `"info"`)
/// 2. Formats them as plain text lines
/// 3. Appends them to the rotating log file
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Silently gives up if the directory cannot be created (logging is optional)
/// - Idempotent: Safe to call multiple times (only first call takes effect)
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = config.log_file();
    if let Some(dir) = log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(RotatingFile::new(log_file))
        .with_ansi(false)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
