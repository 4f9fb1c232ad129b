//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.
//!
//! This implementation mirrors the Redis cache behavior for consistency:
//! task list keys are tracked in a set so `delete_pattern` removes exactly
//! the pages that were cached, never scanning unrelated keys.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use taskdeck_core::cache::{is_task_list_key, pattern_matches, Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are cleaned up on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
///
/// Task list keys are tracked in a set so pattern deletion touches exactly
/// the cached pages.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    /// Main key-value store with LRU eviction.
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Tracks cached task list keys for pattern deletion.
    tracking: Arc<RwLock<HashSet<String>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tracking: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                // Entry exists but is expired - return None.
                // Cleanup is lazy; the entry ages out of the LRU eventually.
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        // Store the value, capturing the entry LRU eviction displaced (if any)
        let evicted = {
            let mut store = self.store.write().await;
            let entry = CacheEntry::new(value.to_vec(), ttl);
            store.push(key.to_string(), entry)
        };

        // An evicted list key must leave the tracking set too, or the set
        // grows without bound under read-heavy workloads. `push` also returns
        // the previous entry when overwriting the same key; that one stays
        // tracked.
        if let Some((evicted_key, _)) = evicted {
            if evicted_key != key && is_task_list_key(&evicted_key) {
                let mut tracking = self.tracking.write().await;
                tracking.remove(&evicted_key);
            }
        }

        // Track list keys for pattern deletion
        if is_task_list_key(key) {
            let mut tracking = self.tracking.write().await;
            tracking.insert(key.to_string());
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if is_task_list_key(key) {
            let mut tracking = self.tracking.write().await;
            tracking.remove(key);
        }

        let mut store = self.store.write().await;
        store.pop(key);

        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        if !is_task_list_key(pattern) {
            // Non-list pattern - fall back to full iteration.
            // This is O(n) but only for patterns outside the tracked set.
            let mut store = self.store.write().await;
            let keys_to_delete: Vec<String> = store
                .iter()
                .filter(|(key, _)| pattern_matches(pattern, key))
                .map(|(key, _)| key.clone())
                .collect();
            for key in keys_to_delete {
                store.pop(&key);
            }
            return Ok(());
        }

        // Filter tracked list keys that match the pattern
        let keys_to_delete: Vec<String> = {
            let tracking = self.tracking.read().await;
            tracking
                .iter()
                .filter(|k| pattern_matches(pattern, k))
                .cloned()
                .collect()
        };

        if !keys_to_delete.is_empty() {
            {
                let mut store = self.store.write().await;
                for key in &keys_to_delete {
                    store.pop(key);
                }
            }

            {
                let mut tracking = self.tracking.write().await;
                for key in &keys_to_delete {
                    tracking.remove(key);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::cache::{task_key, task_list_key, task_list_pattern};

    /// Default max entries for tests
    const TEST_MAX_ENTRIES: usize = 1000;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:key";
        let value = b"test value";

        cache.set(key, value, None).await.unwrap();
        let result = cache.get(key).await.unwrap();

        assert_eq!(result, Some(value.to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let result = cache.get("nonexistent:key").await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:delete";

        cache.set(key, b"to be deleted", None).await.unwrap();
        assert!(cache.get(key).await.unwrap().is_some());

        cache.delete(key).await.unwrap();
        assert!(cache.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:ttl";

        // Set with a very short TTL
        cache
            .set(key, b"short-lived", Some(Duration::from_millis(50)))
            .await
            .unwrap();

        // Should exist immediately
        assert!(cache.get(key).await.unwrap().is_some());

        // Wait for expiration
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Should be expired now
        assert!(cache.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_pattern_removes_tracked_list_pages() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        let page1 = task_list_key(0, 100);
        let page2 = task_list_key(100, 100);
        let single = task_key(7);

        cache.set(&page1, b"1", None).await.unwrap();
        cache.set(&page2, b"2", None).await.unwrap();
        cache.set(&single, b"3", None).await.unwrap();

        cache.delete_pattern(&task_list_pattern()).await.unwrap();

        // List pages are gone
        assert!(cache.get(&page1).await.unwrap().is_none());
        assert!(cache.get(&page2).await.unwrap().is_none());

        // Single-task key does not match `tasks:*`
        assert!(cache.get(&single).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_pattern_no_matches() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("session:123", b"value", None).await.unwrap();

        cache.delete_pattern(&task_list_pattern()).await.unwrap();

        assert!(cache.get("session:123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_list_key_removes_from_tracking() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let page = task_list_key(0, 100);

        cache.set(&page, b"page data", None).await.unwrap();
        {
            let tracking = cache.tracking.read().await;
            assert!(tracking.contains(&page));
        }

        cache.delete(&page).await.unwrap();
        {
            let tracking = cache.tracking.read().await;
            assert!(!tracking.contains(&page));
        }
    }

    #[tokio::test]
    async fn test_delete_pattern_non_list_falls_back() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("session:123:data", b"value1", None).await.unwrap();
        cache.set("session:456:data", b"value2", None).await.unwrap();

        // Delete with a non-list pattern (falls back to full iteration)
        cache.delete_pattern("session:123:*").await.unwrap();

        assert!(cache.get("session:123:data").await.unwrap().is_none());
        assert!(cache.get("session:456:data").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:overwrite";

        cache.set(key, b"first", None).await.unwrap();
        cache.set(key, b"second", None).await.unwrap();

        let result = cache.get(key).await.unwrap();
        assert_eq!(result, Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn test_no_ttl_never_expires() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let key = "test:no-ttl";

        cache.set(key, b"persistent", None).await.unwrap();

        // Even after a small delay, should still exist
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(cache.get(key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        // Create a cache with only 3 entries max
        let cache = MemoryCache::new(3);

        cache.set("key1", b"value1", None).await.unwrap();
        cache.set("key2", b"value2", None).await.unwrap();
        cache.set("key3", b"value3", None).await.unwrap();

        // Access key1 to make it recently used
        cache.get("key1").await.unwrap();

        // Insert a 4th entry - should evict key2 (least recently used)
        cache.set("key4", b"value4", None).await.unwrap();

        assert!(cache.get("key1").await.unwrap().is_some());
        assert!(cache.get("key2").await.unwrap().is_none());
        assert!(cache.get("key3").await.unwrap().is_some());
        assert!(cache.get("key4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lru_eviction_prunes_tracking() {
        let cache = MemoryCache::new(2);

        let page1 = task_list_key(0, 100);
        let page2 = task_list_key(100, 100);
        let page3 = task_list_key(200, 100);

        cache.set(&page1, b"1", None).await.unwrap();
        cache.set(&page2, b"2", None).await.unwrap();
        // Evicts page1 from the store; its tracking entry must go with it
        cache.set(&page3, b"3", None).await.unwrap();

        let tracking = cache.tracking.read().await;
        assert!(!tracking.contains(&page1));
        assert!(tracking.contains(&page2));
        assert!(tracking.contains(&page3));
        assert_eq!(tracking.len(), 2);
    }

    #[tokio::test]
    async fn test_overwriting_list_key_keeps_it_tracked() {
        let cache = MemoryCache::new(2);
        let page = task_list_key(0, 100);

        cache.set(&page, b"first", None).await.unwrap();
        cache.set(&page, b"second", None).await.unwrap();

        assert!(cache.tracking.read().await.contains(&page));
        assert_eq!(cache.get(&page).await.unwrap(), Some(b"second".to_vec()));
    }

    #[tokio::test]
    #[should_panic(expected = "max_entries must be > 0")]
    async fn test_zero_max_entries_panics() {
        let _ = MemoryCache::new(0);
    }
}
