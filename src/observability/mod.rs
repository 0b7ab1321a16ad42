//! Structured logging to a rotating file.
//!
//! The front end owns stdout, so log output goes to a file next to the
//! contact table instead:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFile → phonebook.log
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::init_tracing;
