//! Storage record models for the persistence layer.
//!
//! These types are separate from the domain models to keep the stored shape
//! (phones as nested rows, raw integer ids) independent of what the rest of the
//! crate works with.

use crate::domain::{Contact, ContactId, NewContact};
use serde::{Deserialize, Serialize};

/// One phone number row belonging to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub number: String,
}

/// Represents a contact record in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Identifier assigned by the storage backend on insert.
    pub id: u64,

    pub first_name: String,

    pub last_name: String,

    /// Phone rows in the order they were entered.
    pub phones: Vec<PhoneRecord>,

    /// Unix timestamp of the insert.
    pub created_at: i64,
}

impl ContactRecord {
    /// Builds a record for `contact` with the given identifier and timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use phonebook::domain::NewContact;
    /// use phonebook::storage::ContactRecord;
    ///
    /// let payload = NewContact::new("Ann", "Lee", vec!["555".to_string()]);
    /// let record = ContactRecord::from_new(7, &payload, 1_700_000_000);
    /// assert_eq!(record.phones[0].number, "555");
    /// ```
    #[must_use]
    pub fn from_new(id: u64, contact: &NewContact, created_at: i64) -> Self {
        Self {
            id,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phones: phone_rows(&contact.phones),
            created_at,
        }
    }

    /// Replaces names and phones with those of `contact`, keeping id and timestamp.
    pub fn apply(&mut self, contact: &NewContact) {
        self.first_name.clone_from(&contact.first_name);
        self.last_name.clone_from(&contact.last_name);
        self.phones = phone_rows(&contact.phones);
    }

    #[must_use]
    pub fn to_contact(&self) -> Contact {
        Contact {
            id: ContactId::new(self.id),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phones: self.phones.iter().map(|p| p.number.clone()).collect(),
            created_at: self.created_at,
        }
    }
}

fn phone_rows(phones: &[String]) -> Vec<PhoneRecord> {
    phones
        .iter()
        .map(|number| PhoneRecord {
            number: number.clone(),
        })
        .collect()
}
