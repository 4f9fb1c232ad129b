mod error;
mod requests;
mod types;

pub use error::ValidationError;
pub use requests::{CreateTask, UpdateTask, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
pub use types::{NewTask, Task, TaskCategory, TaskPage, TaskStatus, DEFAULT_PRIORITY};
