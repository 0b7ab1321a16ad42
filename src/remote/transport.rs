//! Message transport between the client and the contact service.

use crate::domain::error::{PhonebookError, Result};
use crate::worker::{ContactWorker, WorkerMessage, WorkerResponse};
use futures_util::future::{self, FutureExt, LocalBoxFuture};
use std::cell::RefCell;

/// Carries one request to the contact service and yields its response.
pub trait Transport {
    fn send(&self, message: WorkerMessage) -> LocalBoxFuture<'_, Result<WorkerResponse>>;
}

/// In-process transport to a [`ContactWorker`].
///
/// Requests and responses still cross a JSON boundary so the client exercises
/// the same protocol a remote service would speak.
pub struct LocalTransport {
    worker: RefCell<ContactWorker>,
}

impl LocalTransport {
    #[must_use]
    pub fn new(worker: ContactWorker) -> Self {
        Self {
            worker: RefCell::new(worker),
        }
    }

    fn exchange(&self, message: &WorkerMessage) -> Result<WorkerResponse> {
        let payload = serde_json::to_string(message)
            .map_err(|e| PhonebookError::Transport(format!("failed to serialize request: {e}")))?;

        let reply = self
            .worker
            .try_borrow_mut()
            .map_err(|_| PhonebookError::Transport("contact service is busy".to_string()))?
            .on_message(&payload)?;

        serde_json::from_str(&reply)
            .map_err(|e| PhonebookError::Transport(format!("failed to deserialize response: {e}")))
    }
}

impl Transport for LocalTransport {
    fn send(&self, message: WorkerMessage) -> LocalBoxFuture<'_, Result<WorkerResponse>> {
        let _span = tracing::debug_span!(
            "transport_send",
            request_id = message.request_id(),
            operation = message.operation()
        )
        .entered();

        future::ready(self.exchange(&message)).boxed_local()
    }
}
