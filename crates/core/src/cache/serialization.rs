//! Serializing cached list pages to and from bytes.
//!
//! Cached payloads are plain JSON with strict parsing: anything that does
//! not decode to exactly a [`TaskPage`] is rejected, and the caller treats
//! the entry as a miss. Cached bytes are data, never anything that gets
//! evaluated.

use thiserror::Error;

use crate::task::TaskPage;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a list page to JSON bytes.
pub fn serialize_page(page: &TaskPage) -> Result<Vec<u8>> {
    serde_json::to_vec(page).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a list page, rejecting malformed payloads.
pub fn deserialize_page(bytes: &[u8]) -> Result<TaskPage> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
