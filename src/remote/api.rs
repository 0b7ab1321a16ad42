//! Interface of the remote contact store as seen by the list layer.

use super::cache::ResultSetKey;
use crate::domain::error::Result;
use crate::domain::{Contact, ContactId, NewContact, SearchPattern};
use futures_util::future::LocalBoxFuture;

/// Request/response API of the contact store.
///
/// Reads return futures so the coordinator can join all three of a generation
/// on one task. Cache maintenance is synchronous and best effort.
pub trait ContactApi {
    /// All contacts whose id is in `ids`. No search, no paging.
    fn query_favorites(&self, ids: Vec<ContactId>) -> LocalBoxFuture<'_, Result<Vec<Contact>>>;

    /// Contacts not in `exclude` matching `search`, ordered by creation, at most
    /// `limit` rows starting at `offset`.
    fn query_others(
        &self,
        search: SearchPattern,
        exclude: Vec<ContactId>,
        offset: usize,
        limit: usize,
    ) -> LocalBoxFuture<'_, Result<Vec<Contact>>>;

    /// Number of contacts `query_others` pages through for the same arguments.
    fn count_others(&self, search: SearchPattern, exclude: Vec<ContactId>) -> LocalBoxFuture<'_, Result<usize>>;

    /// Creates a contact. Fails with `Validation` when the service rejects the
    /// payload and `Transport` otherwise.
    fn create_contact(&self, contact: NewContact) -> LocalBoxFuture<'_, Result<Contact>>;

    fn update_contact(&self, id: ContactId, contact: NewContact) -> LocalBoxFuture<'_, Result<Contact>>;

    fn delete_contact(&self, id: ContactId) -> LocalBoxFuture<'_, Result<ContactId>>;

    /// Evicts the cached entries selected by `key`, returning how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns `Cache` when the cache cannot be updated right now.
    fn invalidate(&self, key: &ResultSetKey) -> Result<usize>;

    /// Evicts every cached entry.
    ///
    /// # Errors
    ///
    /// Returns `Cache` when the cache cannot be updated right now.
    fn evict_all(&self) -> Result<()>;
}
