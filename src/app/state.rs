//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container of the front
//! end. It owns the two local stores, the list coordinator and the transient
//! messages shown around the list, and derives the [`UIViewModel`] the
//! renderer draws.
//!
//! # State Components
//!
//! - **Favorites**: Session-local favorite flags
//! - **Pages**: Paging cursor and search predicate
//! - **Coordinator**: Read generations and the last published list
//! - **Banner / Notice**: Last remote failure, last successful write
//! - **Form errors**: Validation messages of the last rejected write
//!
//! # Example
//!
//! ```rust
//! use phonebook::app::AppState;
//! use phonebook::ui::Theme;
//!
//! let mut state = AppState::new(10, Theme::default());
//! let ticket = state.issue_read();
//! assert_eq!(ticket.snapshot.page.offset, 0);
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.sections.is_empty());
//! ```

use super::coordinator::{ListCoordinator, ListViewModel, ReadTicket};
use super::favorites::FavoritesStore;
use super::pagination::PageStore;
use crate::domain::{Contact, Field, SearchPattern};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BannerInfo, BannerKind, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PagerInfo, SearchBarInfo,
    SectionInfo, UIViewModel,
};

/// Command hints shown in the footer.
pub const KEYBINDINGS: &str =
    "/ <text> search | n next | p prev | f <id> favorite | add <first> <last> <phone>.. | edit <id> .. | del <id> | r refresh | q quit";

/// Central application state container.
///
/// Mutated by the event handler in response to intents and resolved remote
/// calls. View models are computed on demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    pub favorites: FavoritesStore,

    pub pages: PageStore,

    pub coordinator: ListCoordinator,

    /// Last remote failure. Cleared when a generation publishes.
    pub banner: Option<String>,

    /// Confirmation of the last successful write.
    pub notice: Option<String>,

    /// Validation failures of the last rejected write.
    pub form_errors: Vec<(Field, String)>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state with empty favorites at the first page.
    #[must_use]
    pub fn new(page_size: usize, theme: Theme) -> Self {
        Self {
            favorites: FavoritesStore::new(),
            pages: PageStore::new(page_size),
            coordinator: ListCoordinator::new(),
            banner: None,
            notice: None,
            form_errors: Vec::new(),
            theme,
        }
    }

    /// Starts a new read generation for the current stores.
    pub fn issue_read(&mut self) -> ReadTicket {
        self.coordinator.issue(&self.favorites, &self.pages)
    }

    /// Last published list.
    #[must_use]
    pub const fn view(&self) -> Option<&ListViewModel> {
        self.coordinator.view()
    }

    pub fn set_form_error(&mut self, field: Field, message: impl Into<String>) {
        self.form_errors = vec![(field, message.into())];
        self.notice = None;
    }

    pub fn clear_messages(&mut self) {
        self.form_errors.clear();
        self.notice = None;
    }

    /// Builds the renderable view of the current state.
    ///
    /// The list shown is always the last published one, even while a newer
    /// generation is in flight or after it failed.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let view = self.view();

        let status = if self.coordinator.is_pending() {
            Some("loading".to_string())
        } else {
            None
        };

        let search = view.map_or_else(|| self.pages.search(), |v| &v.search);
        let search_bar = (!search.is_empty()).then(|| SearchBarInfo {
            query: search.as_str().to_string(),
        });

        let banner = match (&self.banner, &self.notice) {
            (Some(message), _) => Some(BannerInfo {
                kind: BannerKind::Error,
                message: message.clone(),
            }),
            (None, Some(message)) => Some(BannerInfo {
                kind: BannerKind::Notice,
                message: message.clone(),
            }),
            (None, None) => None,
        };

        let form_errors = self
            .form_errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();

        let mut sections = Vec::new();
        let mut pager = None;
        let mut empty_state = None;

        match view {
            Some(view) if !view.is_empty() => {
                if !view.favorites.is_empty() {
                    sections.push(section("Favorites", &view.favorites, true, search));
                }
                if !view.others.is_empty() {
                    sections.push(section("Contacts", &view.others, false, search));
                }
                pager = Some(PagerInfo {
                    page: view.current_page,
                    has_prev: view.has_prev,
                    has_next: view.has_next,
                    total: view.total_others_count,
                });
            }
            Some(view) => {
                empty_state = Some(if view.search.is_empty() {
                    EmptyState {
                        message: "No contacts yet".to_string(),
                        subtitle: "Add one with: add <first> <last> <phone>".to_string(),
                    }
                } else {
                    EmptyState {
                        message: format!("No contacts match \"{}\"", view.search),
                        subtitle: "Search again, or clear the search with a bare /".to_string(),
                    }
                });
            }
            None if self.banner.is_some() => {
                empty_state = Some(EmptyState {
                    message: "Contacts unavailable".to_string(),
                    subtitle: "Retry with r".to_string(),
                });
            }
            None => {
                empty_state = Some(EmptyState {
                    message: "Loading contacts".to_string(),
                    subtitle: String::new(),
                });
            }
        }

        UIViewModel {
            header: HeaderInfo {
                title: "Phonebook".to_string(),
                status,
            },
            search_bar,
            banner,
            form_errors,
            sections,
            pager,
            footer: FooterInfo {
                keybindings: KEYBINDINGS.to_string(),
            },
            empty_state,
        }
    }
}

fn section(title: &str, contacts: &[Contact], is_favorite: bool, search: &SearchPattern) -> SectionInfo {
    SectionInfo {
        title: title.to_string(),
        rows: contacts
            .iter()
            .map(|contact| {
                let name = contact.full_name();
                DisplayItem {
                    id: contact.id,
                    highlight_ranges: search.match_ranges(&name),
                    name,
                    phones: contact.phones.join(", "),
                    is_favorite,
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::coordinator::{ReadOutcome, RemoteLists};
    use crate::domain::ContactId;

    fn contact(id: u64, first: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            first_name: first.to_string(),
            last_name: "Lee".to_string(),
            phones: vec!["555-0100".to_string(), "555-0101".to_string()],
            created_at: 0,
        }
    }

    fn publish(state: &mut AppState, favorites: Vec<Contact>, others: Vec<Contact>, total: usize) {
        let ticket = state.issue_read();
        state.coordinator.complete(&ReadOutcome {
            generation: ticket.generation,
            snapshot: ticket.snapshot,
            result: Ok(RemoteLists {
                favorites,
                others,
                total_others_count: total,
            }),
        });
    }

    #[test]
    fn sections_follow_the_published_view() {
        let mut state = AppState::new(10, Theme::default());
        state.favorites.toggle(ContactId::new(1));
        publish(&mut state, vec![contact(1, "Ann")], vec![contact(2, "Bob")], 1);

        let vm = state.compute_viewmodel();
        assert_eq!(vm.sections.len(), 2);
        assert_eq!(vm.sections[0].title, "Favorites");
        assert!(vm.sections[0].rows[0].is_favorite);
        assert_eq!(vm.sections[1].rows[0].phones, "555-0100, 555-0101");
        assert_eq!(vm.pager.unwrap().page, 1);
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn search_highlights_names_and_shows_the_bar() {
        let mut state = AppState::new(10, Theme::default());
        state.pages.set_search("bo");
        publish(&mut state, vec![], vec![contact(2, "Bob")], 1);

        let vm = state.compute_viewmodel();
        assert_eq!(vm.search_bar.unwrap().query, "bo");
        assert_eq!(vm.sections[0].rows[0].highlight_ranges, vec![(0, 2)]);
    }

    #[test]
    fn error_banner_wins_over_notice() {
        let mut state = AppState::new(10, Theme::default());
        state.notice = Some("Added contact Ann Lee".to_string());
        state.banner = Some("Transport error: down".to_string());

        let vm = state.compute_viewmodel();
        assert_eq!(vm.banner.unwrap().kind, BannerKind::Error);
        assert_eq!(vm.empty_state.unwrap().message, "Contacts unavailable");
    }

    #[test]
    fn empty_search_result_names_the_predicate() {
        let mut state = AppState::new(10, Theme::default());
        state.pages.set_search("zed");
        publish(&mut state, vec![], vec![], 0);

        let vm = state.compute_viewmodel();
        assert_eq!(vm.empty_state.unwrap().message, "No contacts match \"zed\"");
        assert!(vm.pager.is_none());
    }

    #[test]
    fn pending_generation_marks_the_header() {
        let mut state = AppState::new(10, Theme::default());
        state.issue_read();
        assert_eq!(state.compute_viewmodel().header.status.as_deref(), Some("loading"));
    }
}
