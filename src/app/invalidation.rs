//! Cache invalidation after contact mutations.
//!
//! A successful write makes some cached reads wrong. [`result_sets_for`] names
//! the result sets a mutation touches and [`apply`] evicts them, after which
//! the next generation re-reads them from the contact service.
//!
//! Creating a contact cannot change the favorites read, since a new contact is
//! never a favorite. It can change every others page and every count, under
//! any predicate the new name matches, so both are evicted for all predicates.
//! Updates and deletes can move a contact in or out of any result set.

use crate::remote::{ContactApi, ResultSetKey, ResultSetKind};
use std::fmt;

/// Kind of write that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("create"),
            Self::Updated => f.write_str("update"),
            Self::Deleted => f.write_str("delete"),
        }
    }
}

/// Result sets made stale by a successful `kind` mutation.
///
/// # Examples
///
/// ```
/// use phonebook::app::invalidation::{result_sets_for, MutationKind};
/// use phonebook::remote::ResultSetKind;
///
/// let kinds: Vec<_> = result_sets_for(MutationKind::Created).iter().map(|k| k.kind).collect();
/// assert_eq!(kinds, vec![ResultSetKind::Others, ResultSetKind::Count]);
/// ```
#[must_use]
pub fn result_sets_for(kind: MutationKind) -> Vec<ResultSetKey> {
    match kind {
        MutationKind::Created => vec![
            ResultSetKey::all(ResultSetKind::Others),
            ResultSetKey::all(ResultSetKind::Count),
        ],
        MutationKind::Updated | MutationKind::Deleted => vec![
            ResultSetKey::all(ResultSetKind::Favorites),
            ResultSetKey::all(ResultSetKind::Others),
            ResultSetKey::all(ResultSetKind::Count),
        ],
    }
}

/// Evicts `keys` from the API's cache.
///
/// Failures are logged and skipped. Returns the number of evicted entries.
pub fn apply<A>(api: &A, keys: &[ResultSetKey]) -> usize
where
    A: ContactApi + ?Sized,
{
    let mut dropped = 0;
    for key in keys {
        match api.invalidate(key) {
            Ok(count) => dropped += count,
            Err(e) => tracing::warn!(result_set = %key, error = %e, "invalidation failed"),
        }
    }
    dropped
}
