//! Error types for the phonebook.
//!
//! This module defines the centralized error type [`PhonebookError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The variants follow the three user-facing categories of the list layer:
//! validation problems stay next to the form, transport problems become a banner
//! over the last good list, and invariant violations are programming defects.
//! The remaining variants describe infrastructure failures that are folded into
//! one of those categories before they reach the user.

use crate::domain::contact::ContactId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Form field a validation failure is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    FirstName,
    LastName,
    /// Zero-based position in the phone list.
    Phone(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstName => f.write_str("first name"),
            Self::LastName => f.write_str("last name"),
            Self::Phone(index) => write!(f, "phone #{}", index + 1),
        }
    }
}

/// The main error type for phonebook operations.
///
/// # Examples
///
/// ```
/// use phonebook::domain::{Field, PhonebookError};
///
/// let err = PhonebookError::validation(Field::FirstName, "First name is required");
/// assert!(err.is_validation());
/// assert_eq!(err.to_string(), "first name: First name is required");
/// ```
#[derive(Debug, Error)]
pub enum PhonebookError {
    /// User input was rejected.
    ///
    /// Surfaced inline next to the offending field. Never reaches the list
    /// coordinator.
    #[error("{field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: Field,
        /// Human-readable explanation.
        message: String,
    },

    /// A remote read or write failed.
    ///
    /// Covers network-like failures of the contact service as well as server
    /// side storage errors relayed over the wire.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A store contract was broken.
    ///
    /// Unreachable when the store contracts hold; asserted in debug builds.
    #[error("State invariant violated: {0}")]
    StateInvariant(String),

    /// Storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The result cache could not be maintained.
    #[error("Cache error: {0}")]
    Cache(String),

    /// No contact exists with the given identifier.
    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PhonebookError {
    /// Builds a [`PhonebookError::Validation`] for `field`.
    pub fn validation(field: Field, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns `true` for validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// A specialized `Result` type for phonebook operations.
pub type Result<T> = std::result::Result<T, PhonebookError>;
