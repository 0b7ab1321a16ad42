//! Result cache in front of the contact service.
//!
//! Every read is keyed by its full argument list, so two reads only share an
//! entry when they would have produced the same answer. Mutations never write
//! here; instead the list layer evicts whole result sets through
//! [`ResultSetKey`] and the next read goes back to the service.

use crate::domain::error::{PhonebookError, Result};
use crate::domain::{Contact, ContactId, SearchPattern};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// One of the three reads the list is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultSetKind {
    Favorites,
    Others,
    Count,
}

impl fmt::Display for ResultSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorites => f.write_str("favorites"),
            Self::Others => f.write_str("others"),
            Self::Count => f.write_str("count"),
        }
    }
}

/// Selects cached entries to evict.
///
/// `search: None` selects the result set for every predicate; `Some` narrows
/// it to one predicate. Favorites reads have no predicate, so any key of kind
/// [`ResultSetKind::Favorites`] selects all of them.
///
/// # Examples
///
/// ```
/// use phonebook::remote::{ResultSetKey, ResultSetKind};
///
/// let key = ResultSetKey::all(ResultSetKind::Count);
/// assert_eq!(key.to_string(), "count(*)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSetKey {
    pub kind: ResultSetKind,
    pub search: Option<SearchPattern>,
}

impl ResultSetKey {
    #[must_use]
    pub const fn all(kind: ResultSetKind) -> Self {
        Self { kind, search: None }
    }

    /// Returns `true` if the cached read `key` belongs to this result set.
    #[must_use]
    pub fn covers(&self, key: &QueryKey) -> bool {
        if key.kind() != self.kind {
            return false;
        }
        match (&self.search, key.search()) {
            (None, _) | (_, None) => true,
            (Some(pattern), Some(needle)) => pattern.needle() == needle,
        }
    }
}

impl fmt::Display for ResultSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.search {
            None => write!(f, "{}(*)", self.kind),
            Some(pattern) => write!(f, "{}({:?})", self.kind, pattern.needle()),
        }
    }
}

/// Full argument list of one cached read.
///
/// Identifier lists are kept sorted so equal sets hash equally. Search text is
/// stored in its lowercased matching form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Favorites {
        ids: Vec<ContactId>,
    },
    Others {
        search: String,
        exclude: Vec<ContactId>,
        offset: usize,
        limit: usize,
    },
    Count {
        search: String,
        exclude: Vec<ContactId>,
    },
}

impl QueryKey {
    #[must_use]
    pub fn favorites(ids: &[ContactId]) -> Self {
        Self::Favorites { ids: sorted(ids) }
    }

    #[must_use]
    pub fn others(search: &SearchPattern, exclude: &[ContactId], offset: usize, limit: usize) -> Self {
        Self::Others {
            search: search.needle().to_string(),
            exclude: sorted(exclude),
            offset,
            limit,
        }
    }

    #[must_use]
    pub fn count(search: &SearchPattern, exclude: &[ContactId]) -> Self {
        Self::Count {
            search: search.needle().to_string(),
            exclude: sorted(exclude),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResultSetKind {
        match self {
            Self::Favorites { .. } => ResultSetKind::Favorites,
            Self::Others { .. } => ResultSetKind::Others,
            Self::Count { .. } => ResultSetKind::Count,
        }
    }

    /// Returns the search needle, or `None` for favorites reads.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        match self {
            Self::Favorites { .. } => None,
            Self::Others { search, .. } | Self::Count { search, .. } => Some(search),
        }
    }
}

fn sorted(ids: &[ContactId]) -> Vec<ContactId> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Cached answer of one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedResult {
    Contacts(Vec<Contact>),
    Count(usize),
}

/// Cache of read results keyed by [`QueryKey`].
///
/// Shared by reference between concurrently pending reads on one thread, so
/// the map sits behind a `RefCell`. A borrow conflict surfaces as
/// [`PhonebookError::Cache`] instead of a panic.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RefCell<HashMap<QueryKey, CachedResult>>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached answer for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Cache`] if the cache is being modified.
    pub fn get(&self, key: &QueryKey) -> Result<Option<CachedResult>> {
        let entries = self
            .entries
            .try_borrow()
            .map_err(|e| PhonebookError::Cache(format!("cache busy: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    /// Stores the answer for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Cache`] if the cache is borrowed elsewhere.
    pub fn put(&self, key: QueryKey, value: CachedResult) -> Result<()> {
        self.entries
            .try_borrow_mut()
            .map_err(|e| PhonebookError::Cache(format!("cache busy: {e}")))?
            .insert(key, value);
        Ok(())
    }

    /// Evicts every entry selected by `selector` and returns how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Cache`] if the cache is borrowed elsewhere.
    pub fn invalidate(&self, selector: &ResultSetKey) -> Result<usize> {
        let mut entries = self
            .entries
            .try_borrow_mut()
            .map_err(|e| PhonebookError::Cache(format!("cache busy: {e}")))?;
        let before = entries.len();
        entries.retain(|key, _| !selector.covers(key));
        Ok(before - entries.len())
    }

    /// Drops every entry.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Cache`] if the cache is borrowed elsewhere.
    pub fn clear(&self) -> Result<()> {
        self.entries
            .try_borrow_mut()
            .map_err(|e| PhonebookError::Cache(format!("cache busy: {e}")))?
            .clear();
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.try_borrow().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> QueryCache {
        let cache = QueryCache::new();
        let bob = SearchPattern::new("Bob");
        let ann = SearchPattern::new("ann");
        cache.put(QueryKey::favorites(&[]), CachedResult::Contacts(vec![])).unwrap();
        cache.put(QueryKey::others(&bob, &[], 0, 10), CachedResult::Contacts(vec![])).unwrap();
        cache.put(QueryKey::count(&bob, &[]), CachedResult::Count(1)).unwrap();
        cache.put(QueryKey::others(&ann, &[], 0, 10), CachedResult::Contacts(vec![])).unwrap();
        cache.put(QueryKey::count(&ann, &[]), CachedResult::Count(2)).unwrap();
        cache
    }

    #[test]
    fn keys_ignore_id_order_and_search_case() {
        let a = QueryKey::count(&SearchPattern::new("BOB"), &[ContactId::new(2), ContactId::new(1)]);
        let b = QueryKey::count(&SearchPattern::new("bob"), &[ContactId::new(1), ContactId::new(2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn invalidate_one_predicate_keeps_the_others() {
        let cache = filled();
        let dropped = cache
            .invalidate(&ResultSetKey {
                kind: ResultSetKind::Count,
                search: Some(SearchPattern::new("bob")),
            })
            .unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(cache.len(), 4);
        assert!(cache.get(&QueryKey::count(&SearchPattern::new("ann"), &[])).unwrap().is_some());
    }

    #[test]
    fn invalidate_all_predicates_of_a_kind() {
        let cache = filled();
        assert_eq!(cache.invalidate(&ResultSetKey::all(ResultSetKind::Others)).unwrap(), 2);
        assert_eq!(cache.invalidate(&ResultSetKey::all(ResultSetKind::Favorites)).unwrap(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = filled();
        cache.clear().unwrap();
        assert!(cache.is_empty());
    }
}
