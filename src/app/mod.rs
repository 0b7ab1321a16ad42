//! Application layer coordinating state, events, and actions.
//!
//! This module defines the list orchestration logic, sitting between the front
//! end (main.rs) and the remote contact service. It keeps the favorites set and
//! the paging cursor, turns them into read generations, and merges the results
//! into one list.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Intents → Events → Event Handler → Store Mutations → Actions → Remote Calls
//!                         ↑                                          ↓
//!                         └────────── Reads / Mutations Resolved ────┘
//! ```
//!
//! # Modules
//!
//! - [`favorites`]: Session-local favorite flags
//! - [`pagination`]: Paging cursor and search predicate
//! - [`coordinator`]: Read generations and list merging
//! - [`invalidation`]: Cache eviction after writes
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`state`]: Central application state container and view model computation
//! - [`runtime`]: Action executor
//!
//! # Example
//!
//! ```rust
//! use phonebook::app::{handle_event, AppState, Event};
//! use phonebook::ui::Theme;
//!
//! let mut state = AppState::new(10, Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::Load)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), phonebook::domain::PhonebookError>(())
//! ```

pub mod actions;
pub mod coordinator;
pub mod favorites;
pub mod handler;
pub mod invalidation;
pub mod pagination;
pub mod runtime;
pub mod state;

pub use actions::{Action, Mutation};
pub use coordinator::{Completion, Generation, ListCoordinator, ListViewModel, ReadOutcome, ReadTicket};
pub use favorites::FavoritesStore;
pub use handler::{handle_event, Event, MutationOutcome};
pub use pagination::{PageState, PageStore};
pub use runtime::Runtime;
pub use state::AppState;
