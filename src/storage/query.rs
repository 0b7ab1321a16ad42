//! List queries evaluated over stored contact records.
//!
//! These are the three reads the list view is built from, expressed as pure
//! functions so every backend answers them identically:
//!
//! - [`select_favorites`]: records whose id is in the favorite set, unfiltered
//! - [`select_others`]: records outside the set matching the predicate, paged
//! - [`count_others`]: number of records [`select_others`] pages through
//!
//! Ordering is by creation time, then id, which is stable across inserts.

use super::models::ContactRecord;
use crate::domain::{ContactId, SearchPattern};
use std::collections::BTreeSet;

/// Sorts records by `(created_at, id)`, oldest first.
pub fn sort_by_creation(records: &mut [ContactRecord]) {
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

fn is_other(record: &ContactRecord, exclude: &BTreeSet<ContactId>, search: &SearchPattern) -> bool {
    !exclude.contains(&ContactId::new(record.id))
        && search.matches_name(&record.first_name, &record.last_name)
}

/// Returns the records whose id is in `ids`, in creation order.
///
/// Unknown ids are skipped.
#[must_use]
pub fn select_favorites(mut records: Vec<ContactRecord>, ids: &BTreeSet<ContactId>) -> Vec<ContactRecord> {
    records.retain(|r| ids.contains(&ContactId::new(r.id)));
    sort_by_creation(&mut records);
    records
}

/// Returns one page of records outside `exclude` that match `search`.
///
/// # Examples
///
/// ```
/// use phonebook::domain::{NewContact, SearchPattern};
/// use phonebook::storage::query::select_others;
/// use phonebook::storage::ContactRecord;
/// use std::collections::BTreeSet;
///
/// let records: Vec<ContactRecord> = (1..=5)
///     .map(|i| ContactRecord::from_new(i, &NewContact::new("Ann", "Lee", vec!["555".into()]), i as i64))
///     .collect();
/// let page = select_others(records, &BTreeSet::new(), &SearchPattern::default(), 2, 2);
/// assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 4]);
/// ```
#[must_use]
pub fn select_others(
    mut records: Vec<ContactRecord>,
    exclude: &BTreeSet<ContactId>,
    search: &SearchPattern,
    offset: usize,
    limit: usize,
) -> Vec<ContactRecord> {
    records.retain(|r| is_other(r, exclude, search));
    sort_by_creation(&mut records);
    records.into_iter().skip(offset).take(limit).collect()
}

/// Counts the records outside `exclude` that match `search`.
#[must_use]
pub fn count_others(records: &[ContactRecord], exclude: &BTreeSet<ContactId>, search: &SearchPattern) -> usize {
    records.iter().filter(|r| is_other(r, exclude, search)).count()
}
