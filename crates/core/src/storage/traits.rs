use async_trait::async_trait;

use crate::task::{NewTask, Task, TaskPage};

use super::Result;

/// Repository for task persistence.
///
/// The store owns the canonical records: it assigns ids on create and is
/// the only source consulted for existence checks that gate writes. The
/// cache-aside decorator implements this same trait so handlers never know
/// whether a cache is present.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task and returns it with its assigned id.
    async fn create(&self, new: NewTask) -> Result<Task>;

    /// Gets a task by its id, or `None` if no such record exists.
    async fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Lists up to `limit` tasks starting at `offset`, in primary-key
    /// order, along with the total count of all tasks.
    async fn list(&self, offset: u64, limit: u64) -> Result<TaskPage>;

    /// Persists an already-merged task. Fails with `NotFound` if the id
    /// does not exist.
    async fn update(&self, task: &Task) -> Result<()>;

    /// Deletes a task by its id. Returns whether a record was removed, so
    /// callers can distinguish "nothing to delete" from success.
    async fn delete(&self, id: i64) -> Result<bool>;
}
