//! Notification port (driven/secondary port)
//!
//! Defines the interface for surfacing status-change notifications to the
//! user. Implementations may use a desktop notification daemon, a terminal
//! sink, or a test double.
//!
//! ## Design Notes
//!
//! - Delivery is fire-and-forget; the caller never waits on the user.
//! - Permission is requested at most once, on first opportunity. Denial or
//!   an unavailable notification capability degrades to a silent no-op,
//!   never an error.

use serde::{Deserialize, Serialize};

// ============================================================================
// Permission
// ============================================================================

/// User's notification permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Not yet asked
    Undecided,
    /// Notifications may be shown
    Granted,
    /// The user declined; every notify call is a no-op
    Denied,
}

// ============================================================================
// Notification
// ============================================================================

/// A single user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short, descriptive title
    pub title: String,
    /// Body text with event details
    pub body: String,
}

impl Notification {
    /// Creates a notification with the given title and body
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Creates the standard status-change notification for a file
    pub fn status_change(file_name: &str, status_label: &str) -> Self {
        Self::new(
            "Processing status updated",
            format!("{file_name}: {status_label}"),
        )
    }
}

// ============================================================================
// INotifier trait
// ============================================================================

/// Port trait for notification delivery
///
/// ## Implementation Notes
///
/// - `request_permission` is idempotent: once the user has decided, repeat
///   calls return the decided state without asking again.
/// - `notify` must not fail the caller: implementations swallow delivery
///   errors and log them instead.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    /// Requests permission if undecided, returning the resulting state
    async fn request_permission(&self) -> Permission;

    /// Delivers one notification, if permitted and possible
    async fn notify(&self, notification: &Notification);
}
