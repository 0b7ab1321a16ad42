//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user intents and
//! resolved remote calls, translating them into state changes and action
//! sequences. It serves as the primary control flow coordinator of the
//! application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the front end or from completed remote calls
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via the stores owned by `AppState`
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **List intents**: `ToggleFavorite`, `SetSearch`, `NextPage`, `PrevPage`, `Refresh`
//! - **Write intents**: `AddContact`, `EditContact`, `DeleteContact`
//! - **Remote results**: `ReadsResolved`, `MutationResolved`
//!
//! # Example
//!
//! ```rust
//! use phonebook::app::{handle_event, Action, AppState, Event};
//! use phonebook::ui::Theme;
//!
//! let mut state = AppState::new(10, Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::SetSearch("bob".into()))?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), phonebook::domain::PhonebookError>(())
//! ```

use super::actions::{Action, Mutation};
use super::coordinator::{Completion, ReadOutcome};
use super::invalidation::{result_sets_for, MutationKind};
use crate::app::AppState;
use crate::domain::error::{PhonebookError, Result};
use crate::domain::{Contact, ContactId, NewContact};

/// Result of a write sent to the contact service.
#[derive(Debug)]
pub enum MutationOutcome {
    Created(Result<Contact>),
    Updated(Result<Contact>),
    Deleted { id: ContactId, result: Result<ContactId> },
}

/// Events triggered by user intents or completed remote calls.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug)]
pub enum Event {
    /// Issues the first read generation.
    Load,
    /// Flips the favorite flag of a contact.
    ToggleFavorite(ContactId),
    /// Replaces the search predicate and returns to the first page.
    SetSearch(String),
    /// Advances one page if the published list has a next page.
    NextPage,
    /// Goes back one page, never before the first.
    PrevPage,
    /// Drops every cached result and reads the list again.
    Refresh,

    AddContact(NewContact),
    EditContact { id: ContactId, contact: NewContact },
    DeleteContact(ContactId),

    /// The reads of one generation completed.
    ReadsResolved(ReadOutcome),
    /// A write completed.
    MutationResolved(MutationOutcome),

    /// Ends the session.
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the screen should be redrawn, together with the actions to
/// execute in order.
///
/// # Errors
///
/// Intents and remote results never fail the handler: failures become banners
/// or form errors on `state`. The `Result` is kept for the runtime contract.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Load => Ok((true, vec![Action::Fetch(state.issue_read())])),
        Event::ToggleFavorite(id) => {
            let favorite = state.favorites.toggle(*id);
            tracing::debug!(contact_id = %id, favorite, "handling toggle favorite");
            Ok((true, vec![Action::Fetch(state.issue_read())]))
        }
        Event::SetSearch(text) => {
            state.pages.set_search(text.as_str());
            Ok((true, vec![Action::Fetch(state.issue_read())]))
        }
        Event::NextPage => {
            let pages = &state.pages;
            let can_advance = state.view().is_some_and(|view| {
                view.has_next && view.current_page == pages.current_page() && view.search == *pages.search()
            });
            if !can_advance {
                tracing::debug!("no next page for the current cursor, ignoring");
                return Ok((false, vec![]));
            }
            state.pages.next_page();
            Ok((true, vec![Action::Fetch(state.issue_read())]))
        }
        Event::PrevPage => {
            if state.pages.state().offset == 0 {
                tracing::debug!("already on the first page, ignoring");
                return Ok((false, vec![]));
            }
            state.pages.prev_page();
            Ok((true, vec![Action::Fetch(state.issue_read())]))
        }
        Event::Refresh => {
            state.banner = None;
            Ok((true, vec![Action::EvictAll, Action::Fetch(state.issue_read())]))
        }
        Event::AddContact(contact) => {
            Ok(submit(state, contact, Mutation::Create(contact.clone())))
        }
        Event::EditContact { id, contact } => Ok(submit(
            state,
            contact,
            Mutation::Update {
                id: *id,
                contact: contact.clone(),
            },
        )),
        Event::DeleteContact(id) => {
            state.clear_messages();
            Ok((true, vec![Action::Mutate(Mutation::Delete(*id))]))
        }
        Event::ReadsResolved(outcome) => Ok(handle_reads(state, outcome)),
        Event::MutationResolved(outcome) => Ok(handle_mutation(state, outcome)),
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// Validates a form payload locally before it is sent.
///
/// Rejected payloads stay on the form; the list is not touched.
fn submit(state: &mut AppState, contact: &NewContact, mutation: Mutation) -> (bool, Vec<Action>) {
    if let Err(PhonebookError::Validation { field, message }) = contact.validate() {
        tracing::debug!(%field, %message, "form rejected locally");
        state.set_form_error(field, message);
        return (true, vec![]);
    }
    state.clear_messages();
    (false, vec![Action::Mutate(mutation)])
}

fn handle_reads(state: &mut AppState, outcome: &ReadOutcome) -> (bool, Vec<Action>) {
    match state.coordinator.complete(outcome) {
        Completion::Published(_) => {
            state.banner = None;
            (true, vec![])
        }
        Completion::Discarded(_) => (false, vec![]),
        Completion::Failed(message) => {
            state.banner = Some(message);
            (true, vec![])
        }
        Completion::OutOfRange { count } => {
            state.pages.clamp_to(count);
            (false, vec![Action::Fetch(state.issue_read())])
        }
    }
}

fn handle_mutation(state: &mut AppState, outcome: &MutationOutcome) -> (bool, Vec<Action>) {
    let (kind, result) = match outcome {
        MutationOutcome::Created(result) => (
            MutationKind::Created,
            result.as_ref().map(|c| format!("Added contact {}", c.full_name())),
        ),
        MutationOutcome::Updated(result) => (
            MutationKind::Updated,
            result.as_ref().map(|c| format!("Updated contact {}", c.full_name())),
        ),
        MutationOutcome::Deleted { id, result } => (
            MutationKind::Deleted,
            result.as_ref().map(|_| format!("Deleted contact #{id}")),
        ),
    };

    match result {
        Ok(notice) => {
            if let MutationOutcome::Deleted { id, .. } = outcome {
                state.favorites.forget(*id);
            }
            tracing::info!(mutation = %kind, "{notice}");
            state.notice = Some(notice);
            state.form_errors.clear();
            (
                true,
                vec![
                    Action::Invalidate(result_sets_for(kind)),
                    Action::Fetch(state.issue_read()),
                ],
            )
        }
        Err(PhonebookError::Validation { field, message }) => {
            state.set_form_error(*field, message.clone());
            (true, vec![])
        }
        Err(e) => {
            tracing::warn!(mutation = %kind, error = %e, "mutation failed");
            state.banner = Some(e.to_string());
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::coordinator::RemoteLists;
    use crate::remote::ResultSetKind;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(10, Theme::default())
    }

    fn contact(id: u64, first: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            first_name: first.to_string(),
            last_name: "Lee".to_string(),
            phones: vec!["555".to_string()],
            created_at: 0,
        }
    }

    fn resolve(state: &mut AppState, actions: &[Action], others: Vec<Contact>, total: usize) -> Vec<Action> {
        let ticket = actions
            .iter()
            .find_map(|a| match a {
                Action::Fetch(ticket) => Some(ticket.clone()),
                _ => None,
            })
            .unwrap();
        let outcome = ReadOutcome {
            generation: ticket.generation,
            snapshot: ticket.snapshot,
            result: Ok(RemoteLists {
                favorites: vec![],
                others,
                total_others_count: total,
            }),
        };
        handle_event(state, &Event::ReadsResolved(outcome)).unwrap().1
    }

    #[test]
    fn next_page_is_gated_on_the_published_view() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::NextPage).unwrap(), (false, vec![]));

        let (_, actions) = handle_event(&mut state, &Event::Load).unwrap();
        resolve(&mut state, &actions, (1..=10).map(|i| contact(i, "Ann")).collect(), 12);

        let (render, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(render);
        assert_eq!(actions.len(), 1);
        assert_eq!(state.pages.current_page(), 2);
    }

    #[test]
    fn next_page_waits_for_a_view_of_the_current_page() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Load).unwrap();
        resolve(&mut state, &actions, (1..=10).map(|i| contact(i, "Ann")).collect(), 12);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(actions.len(), 1);
        // page 2 never publishes; the page 1 view still says has_next
        assert_eq!(handle_event(&mut state, &Event::NextPage).unwrap(), (false, vec![]));
        assert_eq!(state.pages.current_page(), 2);

        handle_event(&mut state, &Event::SetSearch("ann".into())).unwrap();
        assert_eq!(handle_event(&mut state, &Event::NextPage).unwrap(), (false, vec![]));
        assert_eq!(state.pages.current_page(), 1);
    }

    #[test]
    fn prev_page_on_first_page_is_ignored() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::PrevPage).unwrap(), (false, vec![]));
    }

    #[test]
    fn invalid_form_never_reaches_the_service() {
        let mut state = state();
        let bad = NewContact::new("Ann", "", vec!["555".to_string()]);
        let (render, actions) = handle_event(&mut state, &Event::AddContact(bad)).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.form_errors[0].0, crate::domain::Field::LastName);
        assert_eq!(state.coordinator.current_generation().get(), 0);
    }

    #[test]
    fn created_contact_invalidates_then_fetches() {
        let mut state = state();
        let outcome = MutationOutcome::Created(Ok(contact(4, "Ann")));
        let (_, actions) = handle_event(&mut state, &Event::MutationResolved(outcome)).unwrap();

        match &actions[..] {
            [Action::Invalidate(keys), Action::Fetch(_)] => {
                let kinds: Vec<_> = keys.iter().map(|k| k.kind).collect();
                assert_eq!(kinds, vec![ResultSetKind::Others, ResultSetKind::Count]);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
        assert_eq!(state.notice.as_deref(), Some("Added contact Ann Lee"));
    }

    #[test]
    fn server_rejection_lands_on_the_form() {
        let mut state = state();
        let outcome = MutationOutcome::Created(Err(PhonebookError::validation(
            crate::domain::Field::Phone(0),
            "Phone number is invalid",
        )));
        let (_, actions) = handle_event(&mut state, &Event::MutationResolved(outcome)).unwrap();
        assert!(actions.is_empty());
        assert!(state.banner.is_none());
        assert_eq!(state.form_errors.len(), 1);
    }

    #[test]
    fn deleting_a_favorite_forgets_it() {
        let mut state = state();
        let id = ContactId::new(3);
        state.favorites.toggle(id);

        let outcome = MutationOutcome::Deleted { id, result: Ok(id) };
        handle_event(&mut state, &Event::MutationResolved(outcome)).unwrap();
        assert!(!state.favorites.is_favorite(id));
    }

    #[test]
    fn out_of_range_page_is_clamped_and_refetched() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Load).unwrap();
        resolve(&mut state, &actions, (1..=10).map(|i| contact(i, "Ann")).collect(), 11);
        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();

        let follow_up = resolve(&mut state, &actions, vec![], 10);
        assert!(matches!(follow_up[..], [Action::Fetch(_)]));
        assert_eq!(state.pages.state().offset, 0);
    }
}
