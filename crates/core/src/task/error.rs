use thiserror::Error;

/// Errors produced when a create or update request violates a task invariant.
///
/// These surface to API clients as 422 responses and are never coerced into
/// a valid value silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task title too long (max {max} characters)")]
    TitleTooLong { max: usize },
    #[error("Task description too long (max {max} characters)")]
    DescriptionTooLong { max: usize },
    #[error("Task priority must be between 1 and 5, got {0}")]
    PriorityOutOfRange(i32),
}
