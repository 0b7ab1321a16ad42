//! Client side of the contact service.
//!
//! - `api`: The [`ContactApi`] trait the list layer consumes
//! - `cache`: Read result cache and result set selectors for invalidation
//! - `transport`: Request delivery, including the in-process [`LocalTransport`]
//! - `client`: [`RemoteClient`], the cache-first [`ContactApi`] implementation

pub mod api;
pub mod cache;
pub mod client;
pub mod transport;

pub use api::ContactApi;
pub use cache::{CachedResult, QueryCache, QueryKey, ResultSetKey, ResultSetKind};
pub use client::RemoteClient;
pub use transport::{LocalTransport, Transport};
