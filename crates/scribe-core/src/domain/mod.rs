//! Domain entities and business logic
//!
//! This module contains the core domain types for scribesync:
//! - Newtypes for type-safe identifiers
//! - The `FileStatus` lifecycle enumeration and server-code mapping
//! - The `FileRecord` entity representing one audio file's pipeline journey
//! - Domain-specific error types

pub mod errors;
pub mod file_record;
pub mod newtypes;
pub mod status;

// Re-export commonly used types
pub use errors::DomainError;
pub use file_record::{FileRecord, FileStats, FileUpdate};
pub use newtypes::{FileId, TaskId, UploadUuid};
pub use status::FileStatus;
