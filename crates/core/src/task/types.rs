use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    /// Returns the stable string form used in storage and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Parses the storage string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Category a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    School,
    Home,
    Work,
    Fun,
    Shopping,
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::Fun
    }
}

impl TaskCategory {
    /// Returns the stable string form used in storage and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::School => "school",
            TaskCategory::Home => "home",
            TaskCategory::Work => "work",
            TaskCategory::Fun => "fun",
            TaskCategory::Shopping => "shopping",
        }
    }

    /// Parses the storage string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "school" => Some(TaskCategory::School),
            "home" => Some(TaskCategory::Home),
            "work" => Some(TaskCategory::Work),
            "fun" => Some(TaskCategory::Fun),
            "shopping" => Some(TaskCategory::Shopping),
            _ => None,
        }
    }
}

/// Default priority applied when a create request omits the field.
pub const DEFAULT_PRIORITY: i32 = 3;

/// A persisted task.
///
/// `id` is assigned by the store on creation and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub category: TaskCategory,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Changes the status, maintaining the `completed_at` transition rule:
    /// set on entering `Done`, cleared on leaving it.
    pub fn set_status(&mut self, status: TaskStatus) {
        match (self.status, status) {
            (TaskStatus::Done, TaskStatus::Done) => {}
            (_, TaskStatus::Done) => self.completed_at = Some(Utc::now()),
            (TaskStatus::Done, _) => self.completed_at = None,
            _ => {}
        }
        self.status = status;
    }
}

/// A task that has been validated but not yet persisted.
///
/// The store assigns the `id` and returns the full [`Task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub category: TaskCategory,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates a new task with all defaults applied.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            category: TaskCategory::default(),
            priority: DEFAULT_PRIORITY,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Attaches the store-assigned id, producing the persisted form.
    pub fn with_id(self, id: i64) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            category: self.category,
            priority: self.priority,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// One page of a task listing plus the total record count.
///
/// This is both the `list` repository result and the JSON response body
/// for `GET /tasks`. `deny_unknown_fields` keeps cached copies strict:
/// anything that does not parse exactly is discarded as a cache miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub total_count: u64,
}
