//! SQLite repository implementation.
//!
//! Implements `TaskRepository` from `taskdeck_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use taskdeck_core::storage::{RepositoryError, Result, TaskRepository};
use taskdeck_core::task::{NewTask, Task, TaskPage};

use super::conversions::{format_datetime, row_to_task};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage. `id` values are SQLite rowids,
/// assigned on insert and never reused while the table exists.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn create(&self, new: NewTask) -> Result<Task> {
        let title = new.title.clone();
        let description = new.description.clone();
        let status = new.status.as_str();
        let category = new.category.as_str();
        let priority = new.priority;
        let created_at = format_datetime(&new.created_at);
        let completed_at = new.completed_at.as_ref().map(format_datetime);

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TASK,
                    rusqlite::params![
                        title,
                        description,
                        status,
                        category,
                        priority,
                        created_at,
                        completed_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Task", "new"))?;

        Ok(new.with_id(id))
    }

    async fn get(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_TASK_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_task) {
                    Ok(task) => Ok(Some(task)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Task", id.to_string()))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<TaskPage> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_TASKS_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([offset, limit], row_to_task)
                    .map_err(wrap_err)?;

                let mut tasks = Vec::new();
                for row_result in rows {
                    tasks.push(row_result.map_err(wrap_err)?);
                }

                let total_count: i64 = conn
                    .query_row(schema::COUNT_TASKS, [], |row| row.get(0))
                    .map_err(wrap_err)?;

                Ok(TaskPage {
                    tasks,
                    total_count: total_count.max(0) as u64,
                })
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn update(&self, task: &Task) -> Result<()> {
        let id = task.id;
        let title = task.title.clone();
        let description = task.description.clone();
        let status = task.status.as_str();
        let category = task.category.as_str();
        let priority = task.priority;
        let completed_at = task.completed_at.as_ref().map(format_datetime);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_TASK,
                        rusqlite::params![
                            id,
                            title,
                            description,
                            status,
                            category,
                            priority,
                            completed_at
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Task", id.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_TASK, [id]).map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Task", id.to_string()))
    }
}
