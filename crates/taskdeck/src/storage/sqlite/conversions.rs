//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use taskdeck_core::task::{Task, TaskCategory, TaskStatus};

/// Convert a SQLite row to a Task.
///
/// Expected columns: id, title, description, status, category, priority, created_at, completed_at
pub fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let status: String = row.get(3)?;
    let category: String = row.get(4)?;
    let priority: i32 = row.get(5)?;
    let created_at: String = row.get(6)?;
    let completed_at: Option<String> = row.get(7)?;

    Ok(Task {
        id,
        title,
        description,
        status: parse_status(&status)?,
        category: parse_category(&category)?,
        priority,
        created_at: parse_datetime(&created_at)?,
        completed_at: completed_at.as_deref().map(parse_datetime).transpose()?,
    })
}

/// Parse TaskStatus from its storage string.
fn parse_status(s: &str) -> rusqlite::Result<TaskStatus> {
    TaskStatus::parse(s).ok_or_else(|| conversion_error(format!("Unknown status: {}", s)))
}

/// Parse TaskCategory from its storage string.
fn parse_category(s: &str) -> rusqlite::Result<TaskCategory> {
    TaskCategory::parse(s).ok_or_else(|| conversion_error(format!("Unknown category: {}", s)))
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
