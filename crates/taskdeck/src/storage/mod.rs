//! Storage backend implementations.
//!
//! The repository trait lives in `taskdeck_core::storage`; this module holds
//! the SQLite implementation and the caching decorator that wraps it.

pub mod cached;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
