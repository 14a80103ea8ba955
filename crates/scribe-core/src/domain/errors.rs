//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including validation failures and invalid lifecycle transitions.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Task identifier was empty or malformed
    #[error("Invalid task id: {0}")]
    InvalidTaskId(String),

    /// Upload UUID was empty or malformed
    #[error("Invalid upload uuid: {0}")]
    InvalidUploadUuid(String),

    /// Progress value outside the 0-100 range or unparsable
    #[error("Invalid progress value: {0}")]
    InvalidProgress(String),

    /// Lookup for a file id that is not in the store
    #[error("Unknown file: {0}")]
    UnknownFile(String),

    /// Invalid lifecycle transition attempt
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status
        from: String,
        /// The attempted target status
        to: String,
    },

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
