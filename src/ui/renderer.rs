//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! Output is returned as one string so the caller decides where it goes.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the screen for `state`, `cols` characters wide.
///
/// # Example
///
/// ```rust
/// use phonebook::app::AppState;
/// use phonebook::ui::{render, Theme};
///
/// let state = AppState::new(10, Theme::default());
/// let screen = render(&state, 80);
/// assert!(screen.contains("Phonebook"));
/// ```
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, &state.theme, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    components::render_screen(&mut out, vm, theme, cols);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::coordinator::{ReadOutcome, RemoteLists};
    use crate::domain::{Contact, ContactId};
    use crate::ui::helpers::strip_ansi;

    fn contact(id: u64, first: &str, last: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phones: vec!["555-0100".to_string()],
            created_at: 0,
        }
    }

    fn published(search: &str, favorites: Vec<Contact>, others: Vec<Contact>, total: usize) -> AppState {
        let mut state = AppState::new(10, Theme::default());
        for contact in &favorites {
            state.favorites.toggle(contact.id);
        }
        state.pages.set_search(search);
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
        state
    }

    #[test]
    fn screen_lists_sections_and_pager() {
        let state = published("", vec![contact(1, "Ann", "Lee")], vec![contact(2, "Bob", "Ray")], 11);
        let screen = strip_ansi(&render(&state, 80));

        assert!(screen.contains("Favorites\n★ #1"));
        assert!(screen.contains("Contacts\n  #2"));
        assert!(screen.contains("Bob Ray"));
        assert!(screen.contains("Page 1"));
        assert!(screen.contains("(11 contacts)"));
        assert!(!screen.contains("Showing results for"));
    }

    #[test]
    fn search_line_and_notice_are_shown() {
        let mut state = published("bob", vec![], vec![contact(2, "Bob", "Ray")], 1);
        state.notice = Some("Added contact Ann Lee".to_string());
        let screen = strip_ansi(&render(&state, 80));

        assert!(screen.contains("Showing results for \"bob\""));
        assert!(screen.contains("✓ Added contact Ann Lee"));
        assert!(screen.contains("(1 contact)"));
    }

    #[test]
    fn empty_list_renders_the_empty_state() {
        let state = published("", vec![], vec![], 0);
        let screen = strip_ansi(&render(&state, 60));
        assert!(screen.contains("No contacts yet"));
        assert!(!screen.contains("Page"));
    }
}
