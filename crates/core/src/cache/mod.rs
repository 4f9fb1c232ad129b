mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{is_task_list_key, task_key, task_list_key, task_list_pattern, LIST_TRACKING_KEY};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_page, serialize_page, SerializationError};
pub use traits::Cache;
