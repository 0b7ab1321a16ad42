//! Contact domain model and input validation.
//!
//! A [`Contact`] is owned by the contact service; the client only ever holds
//! identifiers plus the display fields returned by queries. [`NewContact`] is the
//! user-supplied payload for creating or editing a contact and carries the form
//! validation rules.

use super::error::{Field, PhonebookError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted first or last name, in characters.
pub const NAME_MAX_LEN: usize = 20;

/// Shortest accepted phone number, in characters.
pub const PHONE_MIN_LEN: usize = 3;

/// Longest accepted phone number, in characters.
pub const PHONE_MAX_LEN: usize = 20;

/// Server-assigned contact identifier.
///
/// Opaque to the client and immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// A contact as returned by the contact service.
///
/// `created_at` together with `id` forms the stable ordering key used for
/// paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub phones: Vec<String>,
    pub created_at: i64,
}

impl Contact {
    /// Returns `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// User-supplied contact payload for create and edit.
///
/// # Examples
///
/// ```
/// use phonebook::domain::NewContact;
///
/// let contact = NewContact::new("Ann", "Lee", vec!["555-0100".to_string()]);
/// assert!(contact.validate().is_ok());
///
/// let missing = NewContact::new("", "Lee", vec!["555-0100".to_string()]);
/// assert!(missing.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub phones: Vec<String>,
}

impl NewContact {
    /// Creates a payload with names and phone numbers trimmed.
    ///
    /// Blank phone entries are dropped, mirroring an unfilled extra phone row.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, phones: Vec<String>) -> Self {
        Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            phones: phones
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Checks the payload against the form rules.
    ///
    /// Reports the first offending field, in form order.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        validate_name(Field::FirstName, "First name", &self.first_name)?;
        validate_name(Field::LastName, "Last name", &self.last_name)?;

        if self.phones.is_empty() {
            return Err(PhonebookError::validation(
                Field::Phone(0),
                "Input phone number",
            ));
        }

        for (index, phone) in self.phones.iter().enumerate() {
            validate_phone(index, phone)?;
        }

        Ok(())
    }
}

fn validate_name(field: Field, label: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PhonebookError::validation(field, format!("{label} is required")));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(PhonebookError::validation(
            field,
            format!("{label} must be at most {NAME_MAX_LEN} characters"),
        ));
    }
    let allowed = |c: char| c.is_alphanumeric() || c == ' ' || c == '\'' || c == '-';
    if !value.chars().all(allowed) {
        return Err(PhonebookError::validation(
            field,
            format!("{label} contains special characters"),
        ));
    }
    Ok(())
}

fn validate_phone(index: usize, phone: &str) -> Result<()> {
    let field = Field::Phone(index);
    let len = phone.chars().count();
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.');

    if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&len) || !phone.chars().all(allowed) {
        return Err(PhonebookError::validation(field, "Phone number is invalid"));
    }
    Ok(())
}
