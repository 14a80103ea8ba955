//! Notification delivery over the `INotifier` port
//!
//! [`StatusNotifier`] sits between the sync core and whatever notification
//! backend the host wires in. It asks for permission exactly once per
//! process, caches the answer, and stays silent unless permission was
//! granted. Delivery is fire-and-forget; a sink failure never disturbs the
//! sync pass that triggered it.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use scribe_core::ports::notification::{INotifier, Notification, Permission};

use crate::changes::StatusChange;

/// Notifier that writes notifications to the log
///
/// Used by headless hosts; permission is always granted.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn notify(&self, notification: &Notification) {
        info!(title = %notification.title, "{}", notification.body);
    }
}

/// Permission-gated announcer for status transitions
pub struct StatusNotifier {
    sink: Arc<dyn INotifier>,
    enabled: bool,
    permission: Mutex<Option<Permission>>,
}

impl StatusNotifier {
    /// Creates a notifier over the given sink
    ///
    /// When `enabled` is false all announcements are dropped without ever
    /// requesting permission.
    pub fn new(sink: Arc<dyn INotifier>, enabled: bool) -> Self {
        Self {
            sink,
            enabled,
            permission: Mutex::new(None),
        }
    }

    /// Announces a batch of transitions, one notification per change
    pub async fn announce(&self, changes: &[StatusChange]) {
        if !self.enabled || changes.is_empty() {
            return;
        }

        if self.ensure_permission().await != Permission::Granted {
            debug!(
                count = changes.len(),
                "Dropping notifications, permission not granted"
            );
            return;
        }

        for change in changes {
            let notification = Notification::status_change(&change.file_name, &change.status_label);
            self.sink.notify(&notification).await;
        }
    }

    /// Resolves permission, asking the sink only on the first call
    async fn ensure_permission(&self) -> Permission {
        let mut cached = self.permission.lock().await;
        match *cached {
            Some(permission) => permission,
            None => {
                let permission = self.sink.request_permission().await;
                *cached = Some(permission);
                permission
            }
        }
    }
}
