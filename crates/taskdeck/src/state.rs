//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It uses a repository trait object for storage abstraction
//! and supports different backend combinations via feature flags.

use std::sync::Arc;

use taskdeck_core::storage::TaskRepository;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled
#[cfg(not(feature = "sqlite"))]
compile_error!("Must enable the 'sqlite' storage feature");

// Cache features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Shared application state.
///
/// This is cloned for each request handler and contains the repository
/// trait object for database access.
#[derive(Clone)]
pub struct AppState {
    /// Task repository (cached, wraps underlying storage).
    pub task_repo: Arc<dyn TaskRepository>,
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::config::Config;
    use crate::storage::cached::CachedTaskRepository;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            let task_repo = Arc::new(CachedTaskRepository::new(
                sqlite_repo,
                memory_cache,
                config.cache_ttl(),
            ));

            Ok(Self { task_repo })
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::redis_impl::RedisCache;
    use crate::config::Config;
    use crate::storage::cached::CachedTaskRepository;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        ///
        /// If Redis is unreachable at startup the server still comes up:
        /// handlers are wired to the uncached repository and every request
        /// goes straight to storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);

            let task_repo: Arc<dyn TaskRepository> =
                match RedisCache::new(&config.redis_url).await {
                    Ok(redis_cache) => Arc::new(CachedTaskRepository::new(
                        sqlite_repo,
                        Arc::new(redis_cache),
                        config.cache_ttl(),
                    )),
                    Err(err) => {
                        tracing::warn!(
                            url = %config.redis_url,
                            error = %err,
                            "Redis unavailable, serving without cache"
                        );
                        sqlite_repo
                    }
                };

            Ok(Self { task_repo })
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
