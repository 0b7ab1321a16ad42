//! Action executor.
//!
//! [`Runtime`] owns the application state and a [`ContactApi`]. It feeds events
//! to [`handle_event`], executes the returned actions in order, and turns the
//! results of remote calls back into events until the queue drains.

use super::actions::{Action, Mutation};
use super::coordinator::ListCoordinator;
use super::handler::{handle_event, Event, MutationOutcome};
use super::invalidation;
use super::state::AppState;
use crate::domain::error::Result;
use crate::remote::ContactApi;
use std::collections::VecDeque;
use tracing::Instrument;

/// Single-task driver of the application.
pub struct Runtime<A: ContactApi> {
    api: A,
    state: AppState,
    quit: bool,
}

impl<A: ContactApi> Runtime<A> {
    pub fn new(api: A, state: AppState) -> Self {
        Self {
            api,
            state,
            quit: false,
        }
    }

    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns `true` once a `Quit` action ran.
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Processes `event` and every event its actions produce.
    ///
    /// Returns whether any step asked for a redraw.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn dispatch(&mut self, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut render = false;

        while let Some(event) = queue.pop_front() {
            let (should_render, actions) = handle_event(&mut self.state, &event)?;
            render |= should_render;

            for action in actions {
                if let Some(follow_up) = self.execute(action).await {
                    queue.push_back(follow_up);
                }
            }
        }

        Ok(render)
    }

    async fn execute(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::Fetch(ticket) => {
                let outcome = ListCoordinator::fetch(&self.api, ticket).await;
                Some(Event::ReadsResolved(outcome))
            }
            Action::Mutate(mutation) => Some(Event::MutationResolved(self.mutate(mutation).await)),
            Action::Invalidate(keys) => {
                let dropped = invalidation::apply(&self.api, &keys);
                tracing::debug!(dropped, "cache entries invalidated");
                None
            }
            Action::EvictAll => {
                if let Err(e) = self.api.evict_all() {
                    tracing::warn!(error = %e, "failed to clear result cache");
                }
                None
            }
            Action::Quit => {
                self.quit = true;
                None
            }
        }
    }

    async fn mutate(&self, mutation: Mutation) -> MutationOutcome {
        let span = tracing::debug_span!("mutate", ?mutation);
        async move {
            match mutation {
                Mutation::Create(contact) => MutationOutcome::Created(self.api.create_contact(contact).await),
                Mutation::Update { id, contact } => {
                    MutationOutcome::Updated(self.api.update_contact(id, contact).await)
                }
                Mutation::Delete(id) => MutationOutcome::Deleted {
                    id,
                    result: self.api.delete_contact(id).await,
                },
            }
        }
        .instrument(span)
        .await
    }
}
