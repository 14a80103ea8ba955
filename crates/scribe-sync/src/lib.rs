//! scribesync Sync - File lifecycle synchronization engine
//!
//! Provides:
//! - Periodic poll-and-reconcile against the pipeline dashboard
//! - Per-task progress resolution with monotonic merging
//! - Transition detection and permission-gated notifications
//!
//! ## Modules
//!
//! - [`store`] - The reconciliation core owning the canonical file list
//! - [`progress`] - Task progress fetching and merging
//! - [`changes`] - Snapshot diffing into noteworthy transitions
//! - [`notifier`] - Notification glue over the `INotifier` port
//! - [`scheduler`] - Cancellable periodic sync driver

pub mod changes;
pub mod notifier;
pub mod progress;
pub mod scheduler;
pub mod store;

use thiserror::Error;

/// Errors that can occur during synchronization operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Backend round-trip failed; the last-known-good view is retained
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),

    /// A domain-level error propagated from scribe-core
    #[error("Domain error: {0}")]
    Domain(#[from] scribe_core::domain::errors::DomainError),

    /// The owning view was torn down; the result of this pass was discarded
    #[error("Sync cancelled")]
    Cancelled,
}
