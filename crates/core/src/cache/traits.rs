use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Implementations are best-effort collaborators: callers must treat every
/// error as a miss (reads) or a no-op (writes and invalidation).
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes all values matching a glob pattern (e.g. `"tasks:*"`).
    ///
    /// Implementations must delete every matching key they have stored,
    /// not hand the pattern to a backend that treats it as a literal key.
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}
