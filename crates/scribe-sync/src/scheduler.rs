//! Periodic sync driver
//!
//! [`PollScheduler`] runs an immediate first pass and then repeats on a
//! fixed interval until the store's cancellation token fires. Pass failures
//! are logged and the loop keeps going; the store already retains its
//! last-known-good view.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::store::FileStore;
use crate::SyncError;

pub struct PollScheduler {
    store: Arc<FileStore>,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl PollScheduler {
    /// Creates a scheduler bound to the store's cancellation token
    pub fn new(store: Arc<FileStore>, poll_interval: Duration) -> Self {
        let cancel = store.cancellation_token();
        Self {
            store,
            poll_interval,
            cancel,
        }
    }

    /// Drives sync passes until cancelled
    ///
    /// The first pass runs immediately and stays quiet so the initial page
    /// load does not fire notifications; subsequent passes announce their
    /// transitions. Ticks are not allowed to pile up behind a slow pass.
    pub async fn run(&self) {
        info!(interval_secs = self.poll_interval.as_secs(), "Starting sync loop");

        self.sync_once(false).await;

        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a fresh interval fires immediately; the initial
        // pass above already covered it
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("Sync loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.sync_once(true).await;
                }
            }
        }
    }

    async fn sync_once(&self, notify: bool) {
        match self.store.sync_files(notify).await {
            Ok(changes) => {
                debug!(transitions = changes.len(), "Sync pass complete");
            }
            Err(SyncError::Cancelled) => {
                debug!("Sync pass cancelled");
            }
            Err(err) => {
                warn!(error = %err, "Sync pass failed");
            }
        }
    }
}
