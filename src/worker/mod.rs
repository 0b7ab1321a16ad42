//! Contact service standing behind the remote API.
//!
//! The list layer treats the contact store as an opaque request/response
//! service. This module is that service: it owns the storage backend and
//! answers JSON-encoded requests.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Service implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::ContactWorker;
pub use messages::{WorkerMessage, WorkerResponse};
