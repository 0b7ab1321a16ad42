//! Contact service implementation.
//!
//! [`ContactWorker`] owns a storage backend and answers [`WorkerMessage`]s.
//! It is the server side of the remote API: it validates writes, runs the list
//! queries and maps storage failures to protocol errors. Clients reach it
//! through [`ContactWorker::on_message`], which speaks JSON in both directions.

use crate::domain::error::{PhonebookError, Result};
use crate::domain::{ContactId, NewContact, SearchPattern};
use crate::storage::backend::Storage;
use crate::storage::query;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::collections::BTreeSet;

/// Service-side state for handling contact operations.
pub struct ContactWorker {
    storage: Box<dyn Storage>,
}

impl ContactWorker {
    /// Creates a worker over an initialized storage backend.
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Helper for handling storage operation results with consistent logging.
    ///
    /// Standardizes error mapping and success logging across all operations.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(PhonebookError::Validation { field, message }) => {
                tracing::debug!(operation = operation, %field, %message, "payload rejected");
                WorkerResponse::Rejected { field, message }
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_query_favorites(&self, ids: &[ContactId]) -> WorkerResponse {
        let ids: BTreeSet<ContactId> = ids.iter().copied().collect();
        Self::handle_db_result(
            "query favorites",
            self.storage.get_all_contacts(),
            |records| {
                let contacts = query::select_favorites(records, &ids)
                    .iter()
                    .map(|r| r.to_contact())
                    .collect();
                WorkerResponse::FavoritesLoaded { contacts }
            },
        )
    }

    fn handle_query_others(
        &self,
        search: &str,
        exclude: &[ContactId],
        offset: usize,
        limit: usize,
    ) -> WorkerResponse {
        let exclude: BTreeSet<ContactId> = exclude.iter().copied().collect();
        let search = SearchPattern::new(search);
        Self::handle_db_result(
            "query others",
            self.storage.get_all_contacts(),
            |records| {
                let contacts: Vec<_> = query::select_others(records, &exclude, &search, offset, limit)
                    .iter()
                    .map(|r| r.to_contact())
                    .collect();
                tracing::debug!(row_count = contacts.len(), offset, limit, "others page loaded");
                WorkerResponse::OthersLoaded { contacts }
            },
        )
    }

    fn handle_count_others(&self, search: &str, exclude: &[ContactId]) -> WorkerResponse {
        let exclude: BTreeSet<ContactId> = exclude.iter().copied().collect();
        let search = SearchPattern::new(search);
        Self::handle_db_result(
            "count others",
            self.storage.get_all_contacts(),
            |records| WorkerResponse::OthersCounted {
                count: query::count_others(&records, &exclude, &search),
            },
        )
    }

    fn handle_create_contact(&mut self, contact: &NewContact) -> WorkerResponse {
        let created_at = chrono::Utc::now().timestamp();
        let result = contact
            .validate()
            .and_then(|()| self.storage.insert_contact(contact, created_at));

        Self::handle_db_result("create contact", result, |record| {
            tracing::debug!(contact_id = record.id, "contact created");
            WorkerResponse::ContactCreated {
                contact: record.to_contact(),
            }
        })
    }

    fn handle_update_contact(&mut self, id: ContactId, contact: &NewContact) -> WorkerResponse {
        let result = contact
            .validate()
            .and_then(|()| self.storage.update_contact(id, contact));

        Self::handle_db_result("update contact", result, |record| WorkerResponse::ContactUpdated {
            contact: record.to_contact(),
        })
    }

    fn handle_delete_contact(&mut self, id: ContactId) -> WorkerResponse {
        Self::handle_db_result(
            "delete contact",
            self.storage.delete_contact(id),
            |record| WorkerResponse::ContactDeleted {
                id: ContactId::new(record.id),
            },
        )
    }

    /// Processes a request and returns the matching response.
    ///
    /// Dispatches to specific handlers based on the message variant inside a
    /// span tagged with the request id.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!(
            "worker_handle_message",
            request_id = message.request_id(),
            operation = message.operation()
        );
        let _guard = span.entered();

        match message {
            WorkerMessage::QueryFavorites { ids, .. } => self.handle_query_favorites(&ids),
            WorkerMessage::QueryOthers {
                search,
                exclude,
                offset,
                limit,
                ..
            } => self.handle_query_others(&search, &exclude, offset, limit),
            WorkerMessage::CountOthers { search, exclude, .. } => {
                self.handle_count_others(&search, &exclude)
            }
            WorkerMessage::CreateContact { contact, .. } => self.handle_create_contact(&contact),
            WorkerMessage::UpdateContact { id, contact, .. } => {
                self.handle_update_contact(id, &contact)
            }
            WorkerMessage::DeleteContact { id, .. } => self.handle_delete_contact(id),
        }
    }

    /// Handles one JSON-encoded request and returns the JSON-encoded response.
    ///
    /// A payload that does not decode is answered with
    /// [`WorkerResponse::Error`] rather than dropped, so the caller never waits
    /// on a request that was silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Transport`] only if the response itself cannot
    /// be serialized.
    pub fn on_message(&mut self, payload: &str) -> Result<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("malformed request: {e}"),
                }
            }
        };

        serde_json::to_string(&response)
            .map_err(|e| PhonebookError::Transport(format!("failed to serialize response: {e}")))
    }
}
