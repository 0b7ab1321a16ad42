//! Request and response protocol of the contact service.
//!
//! The list layer never touches storage directly. Every read and write is a
//! [`WorkerMessage`] answered by a [`WorkerResponse`], both serialized as JSON
//! on the way through a [`crate::remote::Transport`]. Each request carries a
//! process-unique `request_id` so the client and service log lines of one
//! exchange can be correlated.

use crate::domain::{Contact, ContactId, Field, NewContact};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a fresh request identifier.
fn next_request_id() -> u64 {
    NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that stamp each message with a fresh
/// request identifier.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with a fresh request id")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        request_id: next_request_id(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    query_favorites(QueryFavorites { ids: Vec<ContactId> }),
    query_others(QueryOthers { search: String, exclude: Vec<ContactId>, offset: usize, limit: usize }),
    count_others(CountOthers { search: String, exclude: Vec<ContactId> }),
    create_contact(CreateContact { contact: NewContact }),
    update_contact(UpdateContact { id: ContactId, contact: NewContact }),
    delete_contact(DeleteContact { id: ContactId }),
}

/// Requests sent to the contact service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load the contacts with the given identifiers, unfiltered and unpaged.
    QueryFavorites {
        ids: Vec<ContactId>,

        #[serde(default)]
        request_id: u64,
    },

    /// Load one page of contacts outside `exclude` matching `search`.
    QueryOthers {
        /// Case-insensitive substring predicate; empty matches all.
        search: String,
        exclude: Vec<ContactId>,
        offset: usize,
        limit: usize,

        #[serde(default)]
        request_id: u64,
    },

    /// Count the contacts `QueryOthers` pages through.
    CountOthers {
        search: String,
        exclude: Vec<ContactId>,

        #[serde(default)]
        request_id: u64,
    },

    /// Insert a new contact.
    CreateContact {
        contact: NewContact,

        #[serde(default)]
        request_id: u64,
    },

    /// Replace names and phones of an existing contact.
    UpdateContact {
        id: ContactId,
        contact: NewContact,

        #[serde(default)]
        request_id: u64,
    },

    /// Remove a contact.
    DeleteContact {
        id: ContactId,

        #[serde(default)]
        request_id: u64,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::QueryFavorites { request_id, .. }
            | Self::QueryOthers { request_id, .. }
            | Self::CountOthers { request_id, .. }
            | Self::CreateContact { request_id, .. }
            | Self::UpdateContact { request_id, .. }
            | Self::DeleteContact { request_id, .. } => *request_id,
        }
    }

    /// Short operation name for logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::QueryFavorites { .. } => "query favorites",
            Self::QueryOthers { .. } => "query others",
            Self::CountOthers { .. } => "count others",
            Self::CreateContact { .. } => "create contact",
            Self::UpdateContact { .. } => "update contact",
            Self::DeleteContact { .. } => "delete contact",
        }
    }
}

/// Responses sent back by the contact service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Answer to `QueryFavorites`, in creation order.
    FavoritesLoaded { contacts: Vec<Contact> },

    /// Answer to `QueryOthers`, in creation order.
    OthersLoaded { contacts: Vec<Contact> },

    /// Answer to `CountOthers`.
    OthersCounted { count: usize },

    ContactCreated { contact: Contact },

    ContactUpdated { contact: Contact },

    ContactDeleted { id: ContactId },

    /// The payload failed server-side validation.
    Rejected {
        field: Field,
        message: String,
    },

    /// The operation failed on the service side.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
