//! Cache key construction.
//!
//! Key shapes: `task:{id}` for a single record's invalidation target and
//! `tasks:{offset}:{limit}` for cached list pages. List keys are also
//! recorded in a tracking set ([`LIST_TRACKING_KEY`]) so backends can
//! delete them precisely instead of relying on server-side key scans.

/// Backend-side set that records every list key currently cached.
pub const LIST_TRACKING_KEY: &str = "tasks:_keys";

/// Returns the cache key for a single task.
pub fn task_key(id: i64) -> String {
    format!("task:{}", id)
}

/// Returns the cache key for one page of the task listing.
pub fn task_list_key(offset: u64, limit: u64) -> String {
    format!("tasks:{}:{}", offset, limit)
}

/// Returns the pattern matching every cached list page.
pub fn task_list_pattern() -> String {
    "tasks:*".to_string()
}

/// Checks whether a cache key is a list-page key (and not the tracking
/// set itself). These keys get recorded in [`LIST_TRACKING_KEY`] on set.
pub fn is_task_list_key(key: &str) -> bool {
    key.starts_with("tasks:") && key != LIST_TRACKING_KEY
}
