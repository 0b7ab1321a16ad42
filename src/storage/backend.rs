//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over persistence
//! backends. The trait is deliberately small: it stores and returns whole
//! contact records, and the list queries (match, exclude, order, page, count)
//! are pure functions in [`crate::storage::query`] applied on top of it.

use crate::domain::error::Result;
use crate::domain::{ContactId, NewContact};
use crate::storage::models::ContactRecord;

/// Abstraction over persistent contact storage.
///
/// # Implementations
///
/// - [`crate::storage::JsonStorage`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryStorage`]: in-process table, nothing persisted
///
/// # Examples
///
/// ```
/// use phonebook::domain::NewContact;
/// use phonebook::storage::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::new();
/// let payload = NewContact::new("Ann", "Lee", vec!["555".to_string()]);
/// let record = storage.insert_contact(&payload, 1_700_000_000)?;
/// assert_eq!(storage.get_all_contacts()?.len(), 1);
/// assert_eq!(record.first_name, "Ann");
/// # Ok::<(), phonebook::PhonebookError>(())
/// ```
pub trait Storage: Send {
    /// Inserts a new contact and assigns it an identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_contact(&mut self, contact: &NewContact, created_at: i64) -> Result<ContactRecord>;

    /// Replaces names and phones of an existing contact.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PhonebookError::NotFound`] for an unknown id, or an
    /// error if the write fails.
    fn update_contact(&mut self, id: ContactId, contact: &NewContact) -> Result<ContactRecord>;

    /// Removes a contact and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PhonebookError::NotFound`] for an unknown id, or an
    /// error if the write fails.
    fn delete_contact(&mut self, id: ContactId) -> Result<ContactRecord>;

    /// Retrieves every stored contact, unsorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get_all_contacts(&self) -> Result<Vec<ContactRecord>>;
}
