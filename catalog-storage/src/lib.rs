//! Persistence for the tool catalog.
//!
//! A [`PersistentCatalog`] loads its backend once when opened and writes the
//! whole catalog back after every successful mutation. Backends only see
//! declarations and records; they never interpret them.

#![warn(missing_docs, clippy::pedantic)]

mod backend;
mod error;
mod session;

pub use backend::{CatalogBackend, JsonFileBackend, MemoryBackend};
pub use error::{StorageError, StorageResult};
pub use session::PersistentCatalog;
