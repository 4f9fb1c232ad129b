//! Core domain logic for taskdeck.
//!
//! Pure types and traits shared by the server and its tests: the task
//! entity and request DTOs, the repository abstraction over relational
//! storage, and the cache abstraction used by the cache-aside layer.
//! Nothing in this crate performs I/O.

pub mod cache;
pub mod storage;
pub mod task;
