//! Domain layer for the phonebook.
//!
//! This module contains the core domain types, independent of storage, transport
//! and rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`contact`]: Contact model, identifiers and input validation
//! - [`search`]: The case-insensitive name predicate
//!
//! # Examples
//!
//! ```
//! use phonebook::domain::{NewContact, Result};
//!
//! fn payload() -> Result<NewContact> {
//!     let contact = NewContact::new("Ann", "Lee", vec!["555-0100".to_string()]);
//!     contact.validate()?;
//!     Ok(contact)
//! }
//! # payload().unwrap();
//! ```

pub mod contact;
pub mod error;
pub mod search;

pub use contact::{Contact, ContactId, NewContact};
pub use error::{Field, PhonebookError, Result};
pub use search::SearchPattern;
