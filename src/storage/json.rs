//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads the entire file into memory once
//! - **Write**: serializes and writes the entire table
//! - **Best for**: personal contact books of a few thousand entries

use crate::domain::error::{PhonebookError, Result};
use crate::domain::{ContactId, NewContact};
use crate::storage::backend::Storage;
use crate::storage::models::ContactRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// JSON storage container format.
///
/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Identifier handed to the next inserted contact.
    next_id: u64,

    /// All stored contacts keyed by id.
    #[serde(default)]
    contacts: BTreeMap<u64, ContactRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            next_id: 1,
            contacts: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The entire table is kept in memory and persisted after every modification.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "next_id": 3,
///   "contacts": {
///     "1": {
///       "id": 1,
///       "first_name": "Ann",
///       "last_name": "Lee",
///       "phones": [{ "number": "555-0100" }],
///       "created_at": 1700000000
///     }
///   }
/// }
/// ```
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy, loaded on creation.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty. Parent
    /// directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use phonebook::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/contacts.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(
            contact_count = data.contacts.len(),
            next_id = data.next_id,
            "storage initialized"
        );

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let mut data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| PhonebookError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(PhonebookError::Storage(format!(
                "unsupported storage version {} (expected at most {FORMAT_VERSION})",
                data.version
            )));
        }

        // A hand-edited file may carry ids at or past the counter.
        let max_id = data.contacts.keys().next_back().copied().unwrap_or(0);
        data.next_id = data.next_id.max(max_id + 1);

        tracing::debug!(
            version = data.version,
            contacts = data.contacts.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Saves storage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write or the rename fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving storage data");

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| PhonebookError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("storage saved successfully");
        Ok(())
    }

    /// Saves the change just applied to `self.data`, or undoes it.
    ///
    /// On a failed save `rollback` restores the previous table, so a write
    /// reported as failed is neither visible to reads nor saved on drop.
    fn persist_or_rollback<F>(&mut self, rollback: F) -> Result<()>
    where
        F: FnOnce(&mut StorageData),
    {
        self.dirty = true;
        if let Err(e) = self.save_to_file() {
            tracing::warn!(path = ?self.file_path, error = %e, "save failed, rolling back change");
            rollback(&mut self.data);
            self.dirty = false;
            return Err(e);
        }
        Ok(())
    }

    fn record_mut(&mut self, id: ContactId) -> Result<&mut ContactRecord> {
        self.data
            .contacts
            .get_mut(&id.get())
            .ok_or(PhonebookError::NotFound(id))
    }
}

impl Storage for JsonStorage {
    fn insert_contact(&mut self, contact: &NewContact, created_at: i64) -> Result<ContactRecord> {
        let _span = tracing::debug_span!("json_insert_contact",
            first_name = %contact.first_name,
            last_name = %contact.last_name
        ).entered();

        let id = self.data.next_id;
        let record = ContactRecord::from_new(id, contact, created_at);
        self.data.contacts.insert(id, record.clone());
        self.data.next_id = id + 1;

        self.persist_or_rollback(|data| {
            data.contacts.remove(&id);
            data.next_id = id;
        })?;

        tracing::debug!(contact_id = id, "contact inserted");
        Ok(record)
    }

    fn update_contact(&mut self, id: ContactId, contact: &NewContact) -> Result<ContactRecord> {
        let _span = tracing::debug_span!("json_update_contact", contact_id = %id).entered();

        let record = self.record_mut(id)?;
        let previous = record.clone();
        record.apply(contact);
        let updated = record.clone();

        self.persist_or_rollback(|data| {
            data.contacts.insert(previous.id, previous);
        })?;

        tracing::debug!("contact updated");
        Ok(updated)
    }

    fn delete_contact(&mut self, id: ContactId) -> Result<ContactRecord> {
        let _span = tracing::debug_span!("json_delete_contact", contact_id = %id).entered();

        let removed = self
            .data
            .contacts
            .remove(&id.get())
            .ok_or(PhonebookError::NotFound(id))?;

        let restored = removed.clone();
        self.persist_or_rollback(|data| {
            data.contacts.insert(restored.id, restored);
        })?;

        tracing::debug!("contact deleted");
        Ok(removed)
    }

    fn get_all_contacts(&self) -> Result<Vec<ContactRecord>> {
        let contacts: Vec<ContactRecord> = self.data.contacts.values().cloned().collect();
        tracing::trace!(count = contacts.len(), "retrieved contacts");
        Ok(contacts)
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(first: &str) -> NewContact {
        NewContact::new(first, "Lee", vec!["555-0100".to_string()])
    }

    #[test]
    fn contacts_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.json");

        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.insert_contact(&payload("Ann"), 10).unwrap();
            storage.insert_contact(&payload("Bob"), 20).unwrap();
        }

        let mut storage = JsonStorage::new(path).unwrap();
        let mut names: Vec<String> = storage
            .get_all_contacts()
            .unwrap()
            .into_iter()
            .map(|r| r.first_name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Ann", "Bob"]);

        let third = storage.insert_contact(&payload("Cid"), 30).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn failed_saves_leave_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let mut storage = JsonStorage::new(path.clone()).unwrap();
        let ann = storage.insert_contact(&payload("Ann"), 1).unwrap();
        let ann_id = ContactId::new(ann.id);

        // a directory where the temp file goes makes every save fail
        let blocker = path.with_extension("tmp");
        std::fs::create_dir(&blocker).unwrap();

        assert!(storage.insert_contact(&payload("Bob"), 2).is_err());
        assert!(storage.update_contact(ann_id, &payload("Ada")).is_err());
        assert!(storage.delete_contact(ann_id).is_err());

        let records = storage.get_all_contacts().unwrap();
        assert_eq!(records, vec![ann.clone()]);

        std::fs::remove_dir(&blocker).unwrap();
        drop(storage);

        let mut reopened = JsonStorage::new(path).unwrap();
        assert_eq!(reopened.get_all_contacts().unwrap(), vec![ann]);
        assert_eq!(reopened.insert_contact(&payload("Cid"), 3).unwrap().id, 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("contacts.json")).unwrap();

        let first = storage.insert_contact(&payload("Ann"), 1).unwrap();
        storage.delete_contact(ContactId::new(first.id)).unwrap();
        let second = storage.insert_contact(&payload("Bob"), 2).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn update_and_delete_of_unknown_id_fail() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("contacts.json")).unwrap();

        let missing = ContactId::new(42);
        assert!(matches!(
            storage.update_contact(missing, &payload("Ann")),
            Err(PhonebookError::NotFound(id)) if id == missing
        ));
        assert!(matches!(
            storage.delete_contact(missing),
            Err(PhonebookError::NotFound(_))
        ));
    }

    #[test]
    fn invalid_json_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(JsonStorage::new(path), Err(PhonebookError::Storage(_))));
    }
}
