//! Session-local set of favorited contacts.
//!
//! Favorites never leave the client: they are not persisted and never sent to
//! the contact service except as the id list of a favorites read.

use crate::domain::ContactId;
use std::collections::{BTreeSet, HashMap};

/// Mapping of contact id to favorite flag.
///
/// Unfavoriting keeps the key with `false`, so the map records every contact
/// the user touched during the session. Only `true` entries count as members.
///
/// # Examples
///
/// ```
/// use phonebook::app::FavoritesStore;
/// use phonebook::domain::ContactId;
///
/// let mut favorites = FavoritesStore::new();
/// let id = ContactId::new(7);
/// assert!(favorites.toggle(id));
/// assert!(favorites.is_favorite(id));
/// assert!(!favorites.toggle(id));
/// assert!(favorites.all_favorite_ids().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesStore {
    flags: HashMap<ContactId, bool>,
}

impl FavoritesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns the new membership.
    ///
    /// An id never seen before becomes a favorite.
    pub fn toggle(&mut self, id: ContactId) -> bool {
        let flag = self.flags.entry(id).or_insert(false);
        *flag = !*flag;
        tracing::debug!(contact_id = %id, favorite = *flag, "favorite toggled");
        *flag
    }

    #[must_use]
    pub fn is_favorite(&self, id: ContactId) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    /// Returns the ids whose flag is `true`, ordered.
    #[must_use]
    pub fn all_favorite_ids(&self) -> BTreeSet<ContactId> {
        self.flags
            .iter()
            .filter_map(|(id, favorite)| favorite.then_some(*id))
            .collect()
    }

    /// Drops every record of `id`. Returns `true` if it was a favorite.
    pub fn forget(&mut self, id: ContactId) -> bool {
        self.flags.remove(&id).unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.values().filter(|favorite| **favorite).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_membership() {
        let mut favorites = FavoritesStore::new();
        let id = ContactId::new(3);
        favorites.toggle(id);
        favorites.toggle(id);
        assert!(!favorites.is_favorite(id));
        assert_eq!(favorites.len(), 0);
    }

    #[test]
    fn ids_are_returned_in_order() {
        let mut favorites = FavoritesStore::new();
        for raw in [9, 2, 5] {
            favorites.toggle(ContactId::new(raw));
        }
        favorites.toggle(ContactId::new(5));
        let ids: Vec<u64> = favorites.all_favorite_ids().into_iter().map(ContactId::get).collect();
        assert_eq!(ids, vec![2, 9]);
    }

    #[test]
    fn forget_removes_a_favorite() {
        let mut favorites = FavoritesStore::new();
        let id = ContactId::new(1);
        favorites.toggle(id);
        assert!(favorites.forget(id));
        assert!(!favorites.forget(id));
        assert!(favorites.is_empty());
    }
}
