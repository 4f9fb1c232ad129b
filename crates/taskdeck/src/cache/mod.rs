//! Cache backend implementations.
//!
//! The `Cache` trait lives in `taskdeck_core::cache`. Backends are selected
//! at compile time via the `memory` and `redis` features.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;
