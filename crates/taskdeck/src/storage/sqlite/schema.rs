//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Tasks table
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL,
    category TEXT NOT NULL,
    priority INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    completed_at TEXT
);

-- Index for title lookups
CREATE INDEX IF NOT EXISTS idx_tasks_title ON tasks(title);
"#;

pub const INSERT_TASK: &str = r#"
INSERT INTO tasks (title, description, status, category, priority, created_at, completed_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_TASK_BY_ID: &str = r#"
SELECT id, title, description, status, category, priority, created_at, completed_at
FROM tasks
WHERE id = ?1
"#;

pub const SELECT_TASKS_PAGE: &str = r#"
SELECT id, title, description, status, category, priority, created_at, completed_at
FROM tasks
ORDER BY id ASC
LIMIT ?2 OFFSET ?1
"#;

pub const COUNT_TASKS: &str = r#"
SELECT COUNT(*) FROM tasks
"#;

pub const UPDATE_TASK: &str = r#"
UPDATE tasks
SET title = ?2, description = ?3, status = ?4, category = ?5, priority = ?6, completed_at = ?7
WHERE id = ?1
"#;

pub const DELETE_TASK: &str = r#"
DELETE FROM tasks
WHERE id = ?1
"#;
