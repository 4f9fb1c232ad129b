//! Task CRUD handlers.
//!
//! These handlers use the repository trait object for database access.
//! Cache population and invalidation are handled by the cached repository
//! decorator, so nothing here knows a cache exists.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use taskdeck_core::storage::RepositoryError;
use taskdeck_core::task::{CreateTask, Task, TaskPage, UpdateTask};

use crate::{handlers::AppError, state::AppState};

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Number of tasks to skip (default: 0)
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of tasks to return (default: 100)
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

fn not_found(id: i64) -> AppError {
    RepositoryError::NotFound {
        entity_type: "Task",
        id: id.to_string(),
    }
    .into()
}

/// List a page of tasks (GET /tasks).
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<TaskPage>, AppError> {
    let page = state.task_repo.list(query.skip, query.limit).await?;
    Ok(Json(page))
}

/// Get a single task by ID (GET /tasks/{id}).
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, AppError> {
    let task = state.task_repo.get(id).await?;

    match task {
        Some(task) => Ok(Json(task)),
        None => Err(not_found(id)),
    }
}

/// Create a new task (POST /tasks).
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    tracing::debug!(payload = ?payload, "Received create task request");

    payload.validate()?;

    let task = state.task_repo.create(payload.into_new_task()).await?;

    tracing::info!(task_id = task.id, title = %task.title, "Created new task");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task by ID (PUT and PATCH /tasks/{id}).
///
/// Both methods share partial-merge semantics: fields absent from the body
/// keep their current value.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTask>,
) -> Result<Json<Task>, AppError> {
    tracing::debug!(task_id = id, payload = ?payload, "Received update task request");

    payload.validate()?;

    let mut task = state.task_repo.get(id).await?.ok_or_else(|| not_found(id))?;

    payload.apply_to(&mut task);
    state.task_repo.update(&task).await?;

    tracing::info!(task_id = id, "Updated task");

    Ok(Json(task))
}

/// Delete a task by ID (DELETE /tasks/{id}).
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(task_id = id, "Received delete task request");

    if !state.task_repo.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(task_id = id, "Deleted task");

    Ok(StatusCode::NO_CONTENT)
}
