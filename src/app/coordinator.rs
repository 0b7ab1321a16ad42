//! List query coordination.
//!
//! The list is built from three independent reads against the contact
//! service: the favorited contacts, one page of the remaining contacts, and the
//! number of remaining contacts matching the search. [`ListCoordinator`] ties
//! the three to one snapshot of the favorites and paging state, tags them with
//! a generation, and publishes a [`ListViewModel`] only for the newest
//! generation.
//!
//! # Flow
//!
//! ```text
//! issue() ──► ReadTicket ──► fetch(api) ──► ReadOutcome ──► complete()
//!   ▲                                                          │
//!   └──────────── every input change bumps the generation ◄────┘
//! ```
//!
//! Outcomes of older generations are dropped on arrival. A failed read fails
//! its whole generation and the last published view stays on screen.

use super::favorites::FavoritesStore;
use super::pagination::{PageState, PageStore};
use crate::domain::error::Result;
use crate::domain::{Contact, ContactId, SearchPattern};
use crate::remote::ContactApi;
use futures_util::future;
use std::collections::BTreeSet;
use std::fmt;
use tracing::Instrument;

/// Monotonic tag of one read triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store state a generation was issued against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub favorites: BTreeSet<ContactId>,
    pub page: PageState,
}

impl Snapshot {
    #[must_use]
    pub fn capture(favorites: &FavoritesStore, pages: &PageStore) -> Self {
        Self {
            favorites: favorites.all_favorite_ids(),
            page: pages.state().clone(),
        }
    }
}

/// Permission to run the reads of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTicket {
    pub generation: Generation,
    pub snapshot: Snapshot,
}

/// Raw answers of the three reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLists {
    pub favorites: Vec<Contact>,
    pub others: Vec<Contact>,
    pub total_others_count: usize,
}

/// Result of running a [`ReadTicket`].
#[derive(Debug)]
pub struct ReadOutcome {
    pub generation: Generation,
    pub snapshot: Snapshot,
    pub result: Result<RemoteLists>,
}

/// Merged, render-ready list for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub generation: Generation,
    pub favorites: Vec<Contact>,
    pub others: Vec<Contact>,
    pub total_others_count: usize,
    pub current_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub search: SearchPattern,
}

impl ListViewModel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.others.is_empty()
    }
}

/// What [`ListCoordinator::complete`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// A new view was published.
    Published(Generation),
    /// The outcome belonged to an older generation and was dropped.
    Discarded(Generation),
    /// A read failed; the previous view is still current.
    Failed(String),
    /// The page is past the end of a shrunken result set. The caller should
    /// clamp the cursor to `count` rows and issue a new generation.
    OutOfRange { count: usize },
}

/// Issues read generations and publishes the newest successful one.
#[derive(Debug, Clone, Default)]
pub struct ListCoordinator {
    current: Generation,
    pending: bool,
    published: Option<ListViewModel>,
}

impl ListCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation for the current store state.
    ///
    /// Any outcome still in flight becomes stale.
    pub fn issue(&mut self, favorites: &FavoritesStore, pages: &PageStore) -> ReadTicket {
        self.current = self.current.next();
        self.pending = true;
        let snapshot = Snapshot::capture(favorites, pages);
        tracing::debug!(
            generation = %self.current,
            favorites = snapshot.favorites.len(),
            offset = snapshot.page.offset,
            search = %snapshot.page.search,
            "read generation issued"
        );
        ReadTicket {
            generation: self.current,
            snapshot,
        }
    }

    #[must_use]
    pub const fn current_generation(&self) -> Generation {
        self.current
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.current
    }

    /// Returns `true` while the current generation has not resolved.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Last published view, if any generation has succeeded yet.
    #[must_use]
    pub const fn view(&self) -> Option<&ListViewModel> {
        self.published.as_ref()
    }

    /// Runs the three reads of `ticket` concurrently.
    ///
    /// The reads share the ticket's snapshot, so the favorite ids excluded from
    /// the others page are exactly the ids the favorites read loads.
    pub async fn fetch<A>(api: &A, ticket: ReadTicket) -> ReadOutcome
    where
        A: ContactApi + ?Sized,
    {
        let ReadTicket { generation, snapshot } = ticket;
        let span = tracing::debug_span!("list_fetch", generation = %generation);

        let ids: Vec<ContactId> = snapshot.favorites.iter().copied().collect();
        let page = &snapshot.page;
        let reads = future::try_join3(
            api.query_favorites(ids.clone()),
            api.query_others(page.search.clone(), ids.clone(), page.offset, page.page_size),
            api.count_others(page.search.clone(), ids),
        );

        let result = reads
            .instrument(span)
            .await
            .map(|(favorites, others, total_others_count)| RemoteLists {
                favorites,
                others,
                total_others_count,
            });

        ReadOutcome {
            generation,
            snapshot,
            result,
        }
    }

    /// Applies a finished outcome.
    ///
    /// Only the current generation can publish or fail; anything older is
    /// discarded without touching the published view.
    pub fn complete(&mut self, outcome: &ReadOutcome) -> Completion {
        if !self.is_current(outcome.generation) {
            tracing::debug!(
                generation = %outcome.generation,
                current = %self.current,
                "stale read outcome discarded"
            );
            return Completion::Discarded(outcome.generation);
        }
        self.pending = false;

        let lists = match &outcome.result {
            Ok(lists) => lists,
            Err(e) => {
                tracing::warn!(generation = %outcome.generation, error = %e, "list read failed");
                return Completion::Failed(e.to_string());
            }
        };

        let page = &outcome.snapshot.page;
        if lists.others.is_empty() && page.offset > 0 && page.offset >= lists.total_others_count {
            tracing::debug!(
                generation = %outcome.generation,
                offset = page.offset,
                count = lists.total_others_count,
                "page past the end of results"
            );
            return Completion::OutOfRange {
                count: lists.total_others_count,
            };
        }

        let view = derive_view(outcome.generation, &outcome.snapshot, lists.clone());
        tracing::debug!(
            generation = %view.generation,
            favorites = view.favorites.len(),
            others = view.others.len(),
            total = view.total_others_count,
            "list view published"
        );
        self.published = Some(view);
        Completion::Published(outcome.generation)
    }
}

/// Merges the three reads of one snapshot into a [`ListViewModel`].
///
/// Rows are re-partitioned against the snapshot so `others` never holds a
/// favorite and `favorites` never holds a non-favorite, whatever the service
/// returned.
#[must_use]
pub fn derive_view(generation: Generation, snapshot: &Snapshot, lists: RemoteLists) -> ListViewModel {
    let RemoteLists {
        mut favorites,
        mut others,
        total_others_count,
    } = lists;

    let before = others.len() + favorites.len();
    others.retain(|c| !snapshot.favorites.contains(&c.id));
    favorites.retain(|c| snapshot.favorites.contains(&c.id));
    if others.len() + favorites.len() != before {
        tracing::warn!(generation = %generation, "service returned rows outside their section");
    }

    let page = &snapshot.page;
    ListViewModel {
        generation,
        favorites,
        others,
        total_others_count,
        current_page: page.page(),
        has_prev: page.offset > 0,
        has_next: page.offset + page.page_size < total_others_count,
        search: page.search.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PhonebookError;

    fn contact(id: u64) -> Contact {
        Contact {
            id: ContactId::new(id),
            first_name: format!("First{id}"),
            last_name: "Doe".to_string(),
            phones: vec!["555".to_string()],
            created_at: i64::try_from(id).unwrap(),
        }
    }

    fn lists(others: &[u64], count: usize) -> RemoteLists {
        RemoteLists {
            favorites: vec![],
            others: others.iter().copied().map(contact).collect(),
            total_others_count: count,
        }
    }

    fn ok(ticket: &ReadTicket, lists: RemoteLists) -> ReadOutcome {
        ReadOutcome {
            generation: ticket.generation,
            snapshot: ticket.snapshot.clone(),
            result: Ok(lists),
        }
    }

    #[test]
    fn has_next_is_false_when_page_end_equals_count() {
        let mut coordinator = ListCoordinator::new();
        let ticket = coordinator.issue(&FavoritesStore::new(), &PageStore::new(10));
        let ids: Vec<u64> = (1..=10).collect();
        coordinator.complete(&ok(&ticket, lists(&ids, 10)));

        let view = coordinator.view().unwrap();
        assert!(!view.has_next);
        assert!(!view.has_prev);
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn stale_outcome_is_discarded_and_newer_published() {
        let mut coordinator = ListCoordinator::new();
        let mut favorites = FavoritesStore::new();
        let pages = PageStore::new(10);

        let first = coordinator.issue(&favorites, &pages);
        favorites.toggle(ContactId::new(1));
        let second = coordinator.issue(&favorites, &pages);

        let stale = coordinator.complete(&ok(&first, lists(&[1, 2], 2)));
        assert_eq!(stale, Completion::Discarded(first.generation));
        assert!(coordinator.view().is_none());
        assert!(coordinator.is_pending());

        let fresh = coordinator.complete(&ok(&second, lists(&[2], 1)));
        assert_eq!(fresh, Completion::Published(second.generation));
        assert_eq!(coordinator.view().unwrap().generation, second.generation);
    }

    #[test]
    fn failure_keeps_the_previous_view() {
        let mut coordinator = ListCoordinator::new();
        let pages = PageStore::new(10);
        let favorites = FavoritesStore::new();

        let first = coordinator.issue(&favorites, &pages);
        coordinator.complete(&ok(&first, lists(&[1], 1)));

        let second = coordinator.issue(&favorites, &pages);
        let failed = coordinator.complete(&ReadOutcome {
            generation: second.generation,
            snapshot: second.snapshot.clone(),
            result: Err(PhonebookError::Transport("connection reset".to_string())),
        });

        assert!(matches!(failed, Completion::Failed(message) if message.contains("connection reset")));
        assert_eq!(coordinator.view().unwrap().generation, first.generation);
        assert!(!coordinator.is_pending());
    }

    #[test]
    fn empty_page_past_the_end_asks_for_clamp() {
        let mut coordinator = ListCoordinator::new();
        let mut pages = PageStore::new(10);
        pages.next_page();
        let ticket = coordinator.issue(&FavoritesStore::new(), &pages);

        let completion = coordinator.complete(&ok(&ticket, lists(&[], 10)));
        assert_eq!(completion, Completion::OutOfRange { count: 10 });
        assert!(coordinator.view().is_none());
    }

    #[test]
    fn derive_view_drops_favorites_from_others() {
        let mut favorites = FavoritesStore::new();
        favorites.toggle(ContactId::new(2));
        let snapshot = Snapshot::capture(&favorites, &PageStore::new(10));

        let view = derive_view(Generation::default(), &snapshot, lists(&[1, 2, 3], 3));
        let ids: Vec<u64> = view.others.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
