//! Storage layer for persistent contact data.
//!
//! This module provides the storage abstraction used by the contact service.
//! The list queries themselves are backend independent.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `memory`: In-process storage implementation
//! - `query`: Favorites, others and count queries over stored records
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;
pub mod query;

pub use backend::Storage;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use models::{ContactRecord, PhoneRecord};
