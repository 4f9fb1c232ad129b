//! Cached repository decorator.

mod task;

pub use task::CachedTaskRepository;
