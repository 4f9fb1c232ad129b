//! Cached task repository decorator.
//!
//! Wraps a `TaskRepository` implementation with the cache-aside pattern.
//! Only list pages are cached; single-task reads always go to the store.
//! Every cache failure degrades to a miss (reads) or a no-op (writes), so
//! callers see identical results whether the cache is healthy or not.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use taskdeck_core::cache::{
    deserialize_page, serialize_page, task_key, task_list_key, task_list_pattern, Cache,
};
use taskdeck_core::storage::{Result, TaskRepository};
use taskdeck_core::task::{NewTask, Task, TaskPage};

/// Cached task repository decorator.
///
/// Implements the cache-aside pattern:
/// - **List reads**: Check cache first, on miss fetch from repository and populate cache
/// - **Writes**: Persist to repository, then invalidate the task key and all list pages
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedTaskRepository<R, C>
where
    R: TaskRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedTaskRepository<R, C>
where
    R: TaskRepository,
    C: Cache,
{
    /// Creates a new cached task repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for cached list pages
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Invalidates every cached list page.
    async fn invalidate_lists(&self) {
        let pattern = task_list_pattern();
        if let Err(err) = self.cache.delete_pattern(&pattern).await {
            tracing::warn!(error = %err, "Failed to invalidate task list cache");
        }
    }

    /// Invalidates the single-task key for `id`.
    async fn invalidate_task(&self, id: i64) {
        let cache_key = task_key(id);
        if let Err(err) = self.cache.delete(&cache_key).await {
            tracing::warn!(task_id = id, error = %err, "Failed to invalidate task cache");
        }
    }
}

#[async_trait]
impl<R, C> TaskRepository for CachedTaskRepository<R, C>
where
    R: TaskRepository + 'static,
    C: Cache + 'static,
{
    async fn create(&self, new: NewTask) -> Result<Task> {
        // 1. Persist to storage
        let task = self.repository.create(new).await?;

        // 2. Invalidate list pages (the new task changes every page)
        self.invalidate_lists().await;

        tracing::debug!(task_id = task.id, "Task created");
        Ok(task)
    }

    async fn get(&self, id: i64) -> Result<Option<Task>> {
        // Single-task reads are not cached; only writes touch task:{id} keys.
        self.repository.get(id).await
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<TaskPage> {
        let cache_key = task_list_key(offset, limit);

        // Check cache first
        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            match deserialize_page(&bytes) {
                Ok(page) => {
                    tracing::trace!(offset, limit, "Cache hit for task list");
                    return Ok(page);
                }
                // Malformed payload - treat as cache miss
                Err(err) => {
                    tracing::warn!(offset, limit, error = %err, "Cached task list rejected");
                }
            }
        }

        // Cache miss - fetch from repository
        tracing::trace!(offset, limit, "Cache miss for task list");
        let page = self.repository.list(offset, limit).await?;

        // Populate cache
        if let Ok(bytes) = serialize_page(&page) {
            if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                tracing::warn!(offset, limit, error = %err, "Failed to cache task list");
            }
        }

        Ok(page)
    }

    async fn update(&self, task: &Task) -> Result<()> {
        // 1. Persist to storage
        self.repository.update(task).await?;

        // 2. Invalidate the task key and all list pages
        self.invalidate_task(task.id).await;
        self.invalidate_lists().await;

        tracing::debug!(task_id = task.id, "Task updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        // 1. Persist deletion to storage
        let deleted = self.repository.delete(id).await?;

        // 2. Invalidate only if a row was actually removed
        if deleted {
            self.invalidate_task(id).await;
            self.invalidate_lists().await;
            tracing::debug!(task_id = id, "Task deleted");
        }

        Ok(deleted)
    }
}
