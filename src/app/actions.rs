//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user intents or resolved
//! remote calls. Actions bridge pure state transformations and effectful
//! operations like reading lists, writing contacts or evicting cached results.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The runtime executes them in
//! order, so an invalidation queued before a fetch is applied before the fetch
//! reads the cache.
//!
//! # Example
//!
//! ```rust
//! use phonebook::app::{Action, invalidation::{result_sets_for, MutationKind}};
//!
//! let actions = vec![Action::Invalidate(result_sets_for(MutationKind::Created))];
//! assert_eq!(actions.len(), 1);
//! ```

use super::coordinator::ReadTicket;
use crate::domain::{ContactId, NewContact};
use crate::remote::ResultSetKey;

/// A write to send to the contact service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(NewContact),
    Update { id: ContactId, contact: NewContact },
    Delete(ContactId),
}

/// Commands representing side effects to be executed by the runtime.
///
/// Actions are produced by the event handler and executed by
/// [`crate::app::Runtime`]. Each action that talks to the contact service
/// feeds its result back as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs the three list reads of one generation.
    ///
    /// Resolves to [`crate::app::Event::ReadsResolved`].
    Fetch(ReadTicket),

    /// Sends a write to the contact service.
    ///
    /// Resolves to [`crate::app::Event::MutationResolved`].
    Mutate(Mutation),

    /// Evicts cached result sets. Failures are logged, never reported.
    Invalidate(Vec<ResultSetKey>),

    /// Drops the whole result cache before a manual refresh.
    EvictAll,

    /// Stops the front end.
    Quit,
}
