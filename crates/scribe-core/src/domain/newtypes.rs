//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for the identifiers that flow between the
//! backend API and the local file store. Server-assigned file ids are
//! opaque strings (the backend serializes numeric primary keys); records
//! inserted optimistically before a server round-trip carry a synthesized
//! local id so they can be told apart and replaced on the next sync pass.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

/// Prefix used for locally synthesized file ids
const LOCAL_ID_PREFIX: &str = "local-";

// ============================================================================
// FileId
// ============================================================================

/// Stable identifier for a file record, unique within the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Wraps a server-assigned identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesizes an id for an optimistic local insert
    ///
    /// Local ids are prefixed so they are distinguishable from server ids
    /// and can never collide with them.
    #[must_use]
    pub fn local() -> Self {
        Self(format!("{}{}", LOCAL_ID_PREFIX, Uuid::new_v4()))
    }

    /// Returns true if this id was synthesized locally and has not been
    /// confirmed by the server
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// TaskId
// ============================================================================

/// Reference to an async processing task on the backend
///
/// Present on a record only while it is in the `Processing` state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task id (must be non-empty)
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidTaskId(id));
        }
        Ok(Self(id))
    }

    /// Returns the task id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// UploadUuid
// ============================================================================

/// Server-side upload handle used by delete, reprocess, and text retrieval
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadUuid(String);

impl UploadUuid {
    /// Creates a validated upload uuid (must be non-empty)
    pub fn new(uuid: impl Into<String>) -> Result<Self, DomainError> {
        let uuid = uuid.into();
        if uuid.trim().is_empty() {
            return Err(DomainError::InvalidUploadUuid(uuid));
        }
        Ok(Self(uuid))
    }

    /// Returns the uuid as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UploadUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ids_are_marked_and_unique() {
        let a = FileId::local();
        let b = FileId::local();
        assert!(a.is_local());
        assert!(b.is_local());
        assert_ne!(a, b);
    }

    #[test]
    fn test_server_id_is_not_local() {
        let id = FileId::new("42");
        assert!(!id.is_local());
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_task_id_rejects_empty() {
        assert!(TaskId::new("").is_err());
        assert!(TaskId::new("   ").is_err());
        assert!(TaskId::new("celery-abc-123").is_ok());
    }

    #[test]
    fn test_upload_uuid_rejects_empty() {
        assert!(UploadUuid::new("").is_err());
        let uuid = UploadUuid::new("9f1a-22").unwrap();
        assert_eq!(uuid.to_string(), "9f1a-22");
    }

    #[test]
    fn test_file_id_serde_transparent() {
        let id = FileId::new("17");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"17\"");
        let back: FileId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
