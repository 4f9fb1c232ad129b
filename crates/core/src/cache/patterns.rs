//! Glob-style pattern matching for cache keys.

/// Checks if a cache key matches a glob pattern.
///
/// `*` matches any sequence of characters, including the empty one. A
/// pattern without wildcards must match the key exactly.
///
/// # Examples
///
/// ```
/// use taskdeck_core::cache::pattern_matches;
///
/// assert!(pattern_matches("task:42", "task:42"));
/// assert!(pattern_matches("tasks:*", "tasks:0:100"));
/// assert!(pattern_matches("*:100", "tasks:0:100"));
/// assert!(!pattern_matches("tasks:*", "task:42"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');

    // Everything before the first '*' must anchor at the start.
    let first = parts.next().unwrap_or("");
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };

    let mut last: Option<&str> = None;
    for part in parts {
        // The previous literal was followed by a '*', so it only needs to
        // occur somewhere in what remains.
        if let Some(prev) = last {
            match rest.find(prev) {
                Some(pos) => rest = &rest[pos + prev.len()..],
                None => return false,
            }
        }
        last = Some(part);
    }

    match last {
        // Trailing literal after the final '*' must anchor at the end.
        Some(tail) => rest.len() >= tail.len() && rest.ends_with(tail),
        // No wildcard at all: the stripped prefix was the whole pattern.
        None => rest.is_empty(),
    }
}
