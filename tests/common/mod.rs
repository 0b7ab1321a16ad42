//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use futures_util::future::{self, FutureExt, LocalBoxFuture};
use phonebook::domain::NewContact;
use phonebook::remote::{LocalTransport, RemoteClient, Transport};
use phonebook::storage::{MemoryStorage, Storage};
use phonebook::ui::Theme;
use phonebook::worker::{ContactWorker, WorkerMessage, WorkerResponse};
use phonebook::{AppState, PhonebookError, Result, Runtime};
use std::cell::{Cell, RefCell};

/// Wraps [`LocalTransport`], recording every operation and failing on demand.
pub struct RecordingTransport {
    inner: LocalTransport,
    pub sent: RefCell<Vec<&'static str>>,
    pub failing: Cell<bool>,
}

impl RecordingTransport {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            inner: LocalTransport::new(ContactWorker::new(storage)),
            sent: RefCell::new(Vec::new()),
            failing: Cell::new(false),
        }
    }

    pub fn count(&self, operation: &str) -> usize {
        self.sent.borrow().iter().filter(|op| **op == operation).count()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, message: WorkerMessage) -> LocalBoxFuture<'_, Result<WorkerResponse>> {
        self.sent.borrow_mut().push(message.operation());
        if self.failing.get() {
            return future::ready(Err(PhonebookError::Transport("connection refused".to_string()))).boxed_local();
        }
        self.inner.send(message)
    }
}

pub type TestRuntime = Runtime<RemoteClient<RecordingTransport>>;

pub fn person(first: &str, last: &str) -> NewContact {
    NewContact::new(first, last, vec!["555-0100".to_string()])
}

/// `count` contacts named `Person1 Lee` .. `PersonN Lee`, created in order.
pub fn people(count: usize) -> Vec<NewContact> {
    (1..=count).map(|i| person(&format!("Person{i}"), "Lee")).collect()
}

pub fn runtime_with(contacts: Vec<NewContact>, page_size: usize) -> TestRuntime {
    let storage = MemoryStorage::with_contacts(contacts).unwrap();
    let client = RemoteClient::new(RecordingTransport::new(Box::new(storage)));
    Runtime::new(client, AppState::new(page_size, Theme::default()))
}

pub fn transport(runtime: &TestRuntime) -> &RecordingTransport {
    runtime.api().transport()
}

pub fn other_names(runtime: &TestRuntime) -> Vec<String> {
    let view = runtime.state().view().unwrap();
    view.others.iter().map(|c| c.first_name.clone()).collect()
}
