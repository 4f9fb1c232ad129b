//! API request types for task operations.
//!
//! Pure data types with no I/O. Validation lives here so that both the
//! HTTP handlers and any other caller enforce the same invariants.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::types::{NewTask, Task, TaskCategory, TaskStatus, DEFAULT_PRIORITY};

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong { max: MAX_TITLE_LEN });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

fn validate_priority(priority: i32) -> Result<(), ValidationError> {
    if !(1..=5).contains(&priority) {
        return Err(ValidationError::PriorityOutOfRange(priority));
    }
    Ok(())
}

/// Request payload for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl CreateTask {
    /// Creates a request with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            category: None,
            priority: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Checks every task invariant against the provided fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }
        Ok(())
    }

    /// Converts into a [`NewTask`], applying defaults for omitted fields.
    ///
    /// Call [`CreateTask::validate`] first; this performs no checking.
    pub fn into_new_task(self) -> NewTask {
        let status = self.status.unwrap_or_default();
        let completed_at = match status {
            TaskStatus::Done => Some(Utc::now()),
            _ => None,
        };
        NewTask {
            title: self.title,
            description: self.description,
            status,
            category: self.category.unwrap_or_default(),
            priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
            created_at: Utc::now(),
            completed_at,
        }
    }
}

/// Request payload for updating a task.
///
/// PUT and PATCH both use this type: fields left out of the request body
/// keep their current value (partial-field merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl UpdateTask {
    /// Creates an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Checks the invariants of every field present in the request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }
        Ok(())
    }

    /// Merges the present fields onto an existing task.
    ///
    /// Absent fields are untouched. Status changes go through
    /// [`Task::set_status`] so `completed_at` stays consistent.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(status) = self.status {
            task.set_status(status);
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid() {
        let request = CreateTask::new("Buy milk").with_description("3.2% fat");
        assert!(request.validate().is_ok());

        let task = request.into_new_task().with_id(1);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description.as_deref(), Some("3.2% fat"));
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.category, TaskCategory::Fun);
        assert_eq!(task.priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn test_create_empty_title_rejected() {
        let request = CreateTask::new("");
        assert_eq!(request.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_create_title_too_long_rejected() {
        let request = CreateTask::new("x".repeat(MAX_TITLE_LEN + 1));
        assert_eq!(
            request.validate(),
            Err(ValidationError::TitleTooLong { max: MAX_TITLE_LEN })
        );
        // Exactly at the limit is fine
        let request = CreateTask::new("x".repeat(MAX_TITLE_LEN));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_description_too_long_rejected() {
        let request =
            CreateTask::new("ok").with_description("y".repeat(MAX_DESCRIPTION_LEN + 1));
        assert_eq!(
            request.validate(),
            Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN
            })
        );
    }

    #[test]
    fn test_create_priority_out_of_range_rejected() {
        for bad in [0, 6, -1] {
            let request = CreateTask::new("ok").with_priority(bad);
            assert_eq!(
                request.validate(),
                Err(ValidationError::PriorityOutOfRange(bad))
            );
        }
        for good in 1..=5 {
            assert!(CreateTask::new("ok").with_priority(good).validate().is_ok());
        }
    }

    #[test]
    fn test_create_done_sets_completed_at() {
        let task = CreateTask::new("Already finished")
            .with_status(TaskStatus::Done)
            .into_new_task()
            .with_id(1);
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn test_update_partial_merge() {
        let mut task = NewTask::new("Original title").with_id(4);
        task.description = Some("Original description".to_string());

        UpdateTask::new()
            .with_status(TaskStatus::InProgress)
            .apply_to(&mut task);

        assert_eq!(task.title, "Original title");
        assert_eq!(task.description.as_deref(), Some("Original description"));
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_update_status_done_sets_completed_at() {
        let mut task = NewTask::new("Finish me").with_id(9);
        UpdateTask::new()
            .with_status(TaskStatus::Done)
            .apply_to(&mut task);
        assert!(task.completed_at.is_some());

        UpdateTask::new()
            .with_status(TaskStatus::Todo)
            .apply_to(&mut task);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_update_validate_only_present_fields() {
        // Empty update is valid
        assert!(UpdateTask::new().validate().is_ok());
        // A present field is still checked
        assert_eq!(
            UpdateTask::new().with_title("").validate(),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            UpdateTask::new().with_priority(11).validate(),
            Err(ValidationError::PriorityOutOfRange(11))
        );
    }

    #[test]
    fn test_update_deserializes_from_sparse_json() {
        let update: UpdateTask = serde_json::from_str(r#"{"status":"done"}"#).unwrap();
        assert_eq!(update.status, Some(TaskStatus::Done));
        assert!(update.title.is_none());
        assert!(update.description.is_none());
    }
}
