//! In-memory storage backend.
//!
//! Holds the contact table in a map for the lifetime of the process. Used by
//! tests and by the `memory` storage setting.

use crate::domain::error::{PhonebookError, Result};
use crate::domain::{ContactId, NewContact};
use crate::storage::backend::Storage;
use crate::storage::models::ContactRecord;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct MemoryStorage {
    contacts: BTreeMap<u64, ContactRecord>,
    next_id: u64,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            contacts: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Builds a storage pre-filled with `contacts`, created one second apart.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`Storage::insert_contact`].
    pub fn with_contacts<I>(contacts: I) -> Result<Self>
    where
        I: IntoIterator<Item = NewContact>,
    {
        let mut storage = Self::new();
        for (offset, contact) in contacts.into_iter().enumerate() {
            let created_at = i64::try_from(offset).unwrap_or(i64::MAX);
            storage.insert_contact(&contact, created_at)?;
        }
        Ok(storage)
    }
}

impl Storage for MemoryStorage {
    fn insert_contact(&mut self, contact: &NewContact, created_at: i64) -> Result<ContactRecord> {
        let id = self.next_id;
        let record = ContactRecord::from_new(id, contact, created_at);
        self.contacts.insert(id, record.clone());
        self.next_id += 1;
        Ok(record)
    }

    fn update_contact(&mut self, id: ContactId, contact: &NewContact) -> Result<ContactRecord> {
        let record = self
            .contacts
            .get_mut(&id.get())
            .ok_or(PhonebookError::NotFound(id))?;
        record.apply(contact);
        Ok(record.clone())
    }

    fn delete_contact(&mut self, id: ContactId) -> Result<ContactRecord> {
        self.contacts
            .remove(&id.get())
            .ok_or(PhonebookError::NotFound(id))
    }

    fn get_all_contacts(&self) -> Result<Vec<ContactRecord>> {
        Ok(self.contacts.values().cloned().collect())
    }
}
