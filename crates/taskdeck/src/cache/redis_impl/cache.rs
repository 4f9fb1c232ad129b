//! Redis cache implementation.
//!
//! Uses set-based key tracking for pattern deletion without SCAN: every
//! cached task list key is recorded in a Redis Set, and `delete_pattern`
//! reads that set, filters it client-side, and deletes the matches. The
//! pattern is never handed to Redis as a key.
//!
//! # Non-Atomicity Safety
//!
//! The operations in this module (especially `delete` and `delete_pattern`) are
//! not atomic - they involve multiple Redis commands. However, this is safe because:
//!
//! - **SREM on non-existent key**: If a key is deleted but the process crashes before
//!   SREM, the tracking set will contain a stale reference. This is harmless because
//!   SREM on a non-existent member is a no-op, and DEL on a non-existent key is also safe.
//!
//! - **Orphaned entries in tracking set**: If keys are added to tracking but the actual
//!   SET fails, the tracking set may reference non-existent keys. This is harmless because
//!   delete_pattern will simply try to delete keys that don't exist.
//!
//! - **Partial deletion**: If delete_pattern deletes some keys but crashes before
//!   completing, subsequent calls will finish the cleanup safely.
//!
//! The worst case is temporary inconsistency, not data corruption or lost writes.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use taskdeck_core::cache::{is_task_list_key, pattern_matches, Cache, Result, LIST_TRACKING_KEY};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
///
/// Task list keys are automatically tracked in a Redis Set to enable
/// pattern-based deletion without using SCAN operations.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let config = redis::aio::ConnectionManagerConfig::new()
            .set_connection_timeout(Duration::from_secs(2))
            .set_response_timeout(Duration::from_secs(2));
        let conn = redis::aio::ConnectionManager::new_with_config(client, config)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        // Set the value
        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        // Track list keys in the tracking set
        if is_task_list_key(key) {
            conn.sadd::<_, _, ()>(LIST_TRACKING_KEY, key)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        // Note: The following operations are not atomic, but this is safe.
        // See module-level documentation for details on non-atomicity safety.

        if is_task_list_key(key) {
            conn.srem::<_, _, ()>(LIST_TRACKING_KEY, key)
                .await
                .map_err(map_redis_error)?;
        }

        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;

        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        if !is_task_list_key(pattern) {
            // Non-list pattern - no-op (only list keys are tracked)
            return Ok(());
        }

        let mut conn = self.conn.clone();

        // Get all tracked list keys
        let tracked_keys: Vec<String> = conn
            .smembers(LIST_TRACKING_KEY)
            .await
            .map_err(map_redis_error)?;

        // Filter keys that match the pattern
        let keys_to_delete: Vec<&String> = tracked_keys
            .iter()
            .filter(|k| pattern_matches(pattern, k))
            .collect();

        if !keys_to_delete.is_empty() {
            // Delete matching keys
            conn.del::<_, ()>(&keys_to_delete)
                .await
                .map_err(map_redis_error)?;

            // Remove from tracking set
            conn.srem::<_, _, ()>(LIST_TRACKING_KEY, &keys_to_delete)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use taskdeck_core::cache::{task_key, task_list_key, task_list_pattern};

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url()).await.ok()
    }

    static KEY_COUNTER: AtomicI64 = AtomicI64::new(0);

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        let n = KEY_COUNTER.fetch_add(1, Ordering::SeqCst);
        format!(
            "test:redis_cache:{}:{}:{}",
            std::process::id(),
            n,
            suffix
        )
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        let value = b"hello world";

        cache.set(&key, value, None).await.unwrap();

        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value.to_vec()));

        // Clean up
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("nonexistent");
        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_redis_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("delete");

        cache.set(&key, b"to be deleted", None).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        cache.delete(&key).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");

        // Set with 1 second TTL
        cache
            .set(&key, b"expiring value", Some(Duration::from_secs(1)))
            .await
            .unwrap();

        assert!(cache.get(&key).await.unwrap().is_some());

        // Wait for expiration
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_delete_pattern_uses_tracking_set() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let page1 = task_list_key(0, 100);
        let page2 = task_list_key(100, 100);
        let single = task_key(7);

        cache.set(&page1, b"value1", None).await.unwrap();
        cache.set(&page2, b"value2", None).await.unwrap();
        cache.set(&single, b"value3", None).await.unwrap();

        // Verify pages landed in the tracking set
        let mut conn = cache.conn.clone();
        let tracked: Vec<String> = conn.smembers(LIST_TRACKING_KEY).await.unwrap();
        assert!(tracked.contains(&page1));
        assert!(tracked.contains(&page2));

        cache.delete_pattern(&task_list_pattern()).await.unwrap();

        // List pages are gone
        assert!(cache.get(&page1).await.unwrap().is_none());
        assert!(cache.get(&page2).await.unwrap().is_none());

        // Single-task key does not match `tasks:*`
        assert!(cache.get(&single).await.unwrap().is_some());

        // Tracking set no longer references the pages
        let tracked_after: Vec<String> = conn.smembers(LIST_TRACKING_KEY).await.unwrap();
        assert!(!tracked_after.contains(&page1));
        assert!(!tracked_after.contains(&page2));

        // Clean up
        cache.delete(&single).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete_list_key_removes_from_tracking() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let page = task_list_key(200, 50);
        cache.set(&page, b"page data", None).await.unwrap();

        let mut conn = cache.conn.clone();
        let tracked: Vec<String> = conn.smembers(LIST_TRACKING_KEY).await.unwrap();
        assert!(tracked.contains(&page));

        cache.delete(&page).await.unwrap();

        let tracked_after: Vec<String> = conn.smembers(LIST_TRACKING_KEY).await.unwrap();
        assert!(!tracked_after.contains(&page));
    }

    #[tokio::test]
    async fn test_redis_delete_pattern_non_list_is_noop() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("noop");
        cache.set(&key, b"value", None).await.unwrap();

        cache.delete_pattern("session:*").await.unwrap();

        // Key should still exist
        assert!(cache.get(&key).await.unwrap().is_some());

        // Clean up
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_overwrite() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("overwrite");

        cache.set(&key, b"initial", None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"initial".to_vec()));

        cache.set(&key, b"updated", None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"updated".to_vec()));

        // Clean up
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_binary_data() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("binary");
        let value: Vec<u8> = (0..=255).collect();

        cache.set(&key, &value, None).await.unwrap();

        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value));

        // Clean up
        cache.delete(&key).await.unwrap();
    }
}
