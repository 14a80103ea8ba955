//! Reconciliation core owning the canonical file list
//!
//! [`FileStore`] is the single writer for the in-memory record list. Each
//! sync pass fetches the dashboard, converts and merges the server's items,
//! resolves task progress concurrently, and then swaps the whole list in
//! under one write lock. The server is authoritative: records the dashboard
//! no longer reports are dropped, together with their snapshot entries.
//!
//! Failure keeps the last-known-good view. A failed dashboard fetch only
//! records an error string; the list and snapshot cache stay as they were.
//! A cancelled pass discards its result without touching state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use scribe_core::domain::errors::DomainError;
use scribe_core::domain::file_record::{FileRecord, FileStats, FileUpdate};
use scribe_core::domain::newtypes::{FileId, TaskId, UploadUuid};
use scribe_core::domain::status::FileStatus;
use scribe_core::ports::backend::{DashboardItem, ExportArchive, IBackendApi};
use scribe_core::ports::notification::INotifier;

use crate::changes::{self, SnapshotEntry, StatusChange};
use crate::notifier::StatusNotifier;
use crate::progress::ProgressResolver;
use crate::SyncError;

// ============================================================================
// Conversion
// ============================================================================

/// Converts a dashboard item into a fresh record
///
/// Invalid task ids and upload uuids are dropped rather than failing the
/// whole pass; the affected record simply loses that capability until the
/// server reports a usable value.
fn record_from_item(item: DashboardItem) -> FileRecord {
    let status = FileStatus::from_code(&item.status, Some(&item.status_display));
    let status_display = if item.status_display.is_empty() {
        status.label().to_string()
    } else {
        item.status_display
    };

    FileRecord {
        id: FileId::new(item.id),
        name: item.file_name,
        status,
        status_display,
        task_id: item.task_id.and_then(|t| TaskId::new(t).ok()),
        progress: None,
        progress_label: None,
        uploaded_at: item.uploaded_at,
        file_type: item.file_type_display,
        subset: item.subset_title,
        upload_uuid: item.upload_uuid.and_then(|u| UploadUuid::new(u).ok()),
        original_text: None,
        processed_text: None,
        edited_text: None,
        uploader: item.uploader,
    }
}

// ============================================================================
// FileStore
// ============================================================================

#[derive(Default)]
struct StoreState {
    files: Vec<FileRecord>,
    snapshot_cache: HashMap<FileId, SnapshotEntry>,
    recently_added: Option<FileId>,
    last_error: Option<String>,
    last_synced_at: Option<DateTime<Utc>>,
}

/// The synchronization core
///
/// Owns the record list, the comparison snapshot from the previous pass, and
/// the sync error flag. All mutation funnels through its methods.
pub struct FileStore {
    backend: Arc<dyn IBackendApi>,
    resolver: ProgressResolver,
    notifier: StatusNotifier,
    progress_concurrency: usize,
    cancel: CancellationToken,
    state: RwLock<StoreState>,
}

impl FileStore {
    /// Creates a store over the given backend and notification sink
    pub fn new(
        backend: Arc<dyn IBackendApi>,
        notification_sink: Arc<dyn INotifier>,
        notifications_enabled: bool,
        progress_concurrency: usize,
    ) -> Self {
        Self {
            resolver: ProgressResolver::new(backend.clone()),
            notifier: StatusNotifier::new(notification_sink, notifications_enabled),
            backend,
            progress_concurrency: progress_concurrency.max(1),
            cancel: CancellationToken::new(),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Token observed by this store and its scheduler
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancels any in-flight pass and stops future ones
    pub fn shutdown(&self) {
        info!("Shutting down sync store");
        self.cancel.cancel();
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// Current records, in dashboard order
    pub async fn files(&self) -> Vec<FileRecord> {
        self.state.read().await.files.clone()
    }

    /// Looks up one record by id
    pub async fn get_file_by_id(&self, id: &FileId) -> Option<FileRecord> {
        self.state
            .read()
            .await
            .files
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    /// Per-status counts over the current list
    pub async fn stats(&self) -> FileStats {
        FileStats::collect(&self.state.read().await.files)
    }

    /// Error string from the most recent failed pass, if any
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Completion time of the most recent successful pass
    pub async fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_synced_at
    }

    /// Id of the most recently added local record, if not yet cleared
    pub async fn recently_added(&self) -> Option<FileId> {
        self.state.read().await.recently_added.clone()
    }

    /// Clears the recently-added marker
    pub async fn clear_recently_added(&self) {
        self.state.write().await.recently_added = None;
    }

    // ------------------------------------------------------------------
    // Local mutation
    // ------------------------------------------------------------------

    /// Inserts an optimistic record at the front of the list
    ///
    /// The record carries a local id; the next pass replaces it with the
    /// server's version once the upload surfaces on the dashboard.
    pub async fn add_file(&self, record: FileRecord) {
        let mut state = self.state.write().await;
        state.recently_added = Some(record.id.clone());
        debug!(file = %record.id, name = %record.name, "Adding optimistic record");
        state.files.insert(0, record);
    }

    /// Removes a record and its snapshot entry
    ///
    /// Purging the snapshot means a later re-appearance of the same id is
    /// treated as a first observation and stays silent.
    pub async fn remove_file(&self, id: &FileId) {
        let mut state = self.state.write().await;
        state.files.retain(|r| &r.id != id);
        state.snapshot_cache.remove(id);
        if state.recently_added.as_ref() == Some(id) {
            state.recently_added = None;
        }
    }

    /// Applies a partial update to one record
    ///
    /// Unknown ids are ignored; the record may have been dropped by a
    /// concurrent pass.
    pub async fn update_file(&self, id: &FileId, update: FileUpdate) {
        let mut state = self.state.write().await;
        if let Some(record) = state.files.iter_mut().find(|r| &r.id == id) {
            record.apply_update(update);
            let entry = SnapshotEntry::from(&*record);
            state.snapshot_cache.insert(id.clone(), entry);
        } else {
            debug!(file = %id, "Update for unknown record ignored");
        }
    }

    // ------------------------------------------------------------------
    // Synchronization
    // ------------------------------------------------------------------

    /// Runs one full sync pass
    ///
    /// Fetch, convert, merge, resolve progress, then atomically replace the
    /// list. Returns the noteworthy transitions of this pass; when `notify`
    /// is set they are also announced through the notifier.
    pub async fn sync_files(&self, notify: bool) -> Result<Vec<StatusChange>, SyncError> {
        if self.cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        let snapshot = match self.backend.fetch_dashboard().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "Dashboard fetch failed, keeping previous view");
                self.state.write().await.last_error = Some(err.to_string());
                return Err(SyncError::Backend(err));
            }
        };

        // Merge server items against the current list so locally held fields
        // (transcripts, in-flight progress) survive the replacement. The list
        // is keyed by id; a duplicate id in one snapshot keeps the first copy.
        let merged: Vec<FileRecord> = {
            let state = self.state.read().await;
            let mut seen = HashSet::new();
            snapshot
                .items
                .into_iter()
                .filter_map(|item| {
                    let incoming = record_from_item(item);
                    if !seen.insert(incoming.id.clone()) {
                        warn!(file = %incoming.id, "Duplicate id in dashboard snapshot");
                        return None;
                    }
                    Some(match state.files.iter().find(|r| r.id == incoming.id) {
                        Some(existing) => {
                            let mut record = existing.clone();
                            record.merge_server(incoming);
                            record
                        }
                        None => incoming,
                    })
                })
                .collect()
        };

        let resolved = self
            .resolver
            .resolve_all(merged, self.progress_concurrency)
            .await;

        // Cancellation after the fetches discards the pass entirely
        if self.cancel.is_cancelled() {
            debug!("Sync pass cancelled, discarding results");
            return Err(SyncError::Cancelled);
        }

        let changed = {
            let mut state = self.state.write().await;
            let changed = changes::detect_changes(&state.snapshot_cache, &resolved);
            state.snapshot_cache = changes::snapshot_of(&resolved);
            state.files = resolved;
            state.last_error = None;
            state.last_synced_at = Some(Utc::now());
            changed
        };

        if !changed.is_empty() {
            info!(count = changed.len(), "Status transitions detected");
        }
        if notify {
            self.notifier.announce(&changed).await;
        }

        Ok(changed)
    }

    /// Refreshes one record's status straight from the backend
    ///
    /// A targeted alternative to a full pass, used when the caller wants the
    /// authoritative state of a single file right now. The fetched status is
    /// applied locally and the updated record returned.
    pub async fn check_file_status(&self, id: &FileId) -> Result<FileRecord, SyncError> {
        self.get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()))?;

        let report = self.backend.fetch_file_status(id).await?;
        let status = FileStatus::from_code(&report.current_status, Some(&report.status_display));
        let status_display = if report.status_display.is_empty() {
            status.label().to_string()
        } else {
            report.status_display
        };

        self.update_file(
            id,
            FileUpdate {
                status: Some(status),
                status_display: Some(status_display),
                ..FileUpdate::default()
            },
        )
        .await;

        self.get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()).into())
    }

    // ------------------------------------------------------------------
    // Review actions
    // ------------------------------------------------------------------

    /// Approves a reviewable record on the server and locally
    pub async fn approve_file(&self, id: &FileId) -> Result<(), SyncError> {
        self.review(id, FileStatus::Approved, "A").await
    }

    /// Rejects a reviewable record on the server and locally
    pub async fn reject_file(&self, id: &FileId) -> Result<(), SyncError> {
        self.review(id, FileStatus::Rejected, "R").await
    }

    async fn review(
        &self,
        id: &FileId,
        target: FileStatus,
        status_code: &str,
    ) -> Result<(), SyncError> {
        let record = self
            .get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()))?;
        if !record.status.is_reviewable() {
            return Err(DomainError::InvalidTransition {
                from: record.status.label().to_string(),
                to: target.label().to_string(),
            }
            .into());
        }

        self.backend.set_file_status(id, status_code).await?;

        let mut state = self.state.write().await;
        if let Some(record) = state.files.iter_mut().find(|r| &r.id == id) {
            let result = match target {
                FileStatus::Approved => record.approve(),
                _ => record.reject(),
            };
            if let Err(err) = result {
                // The server accepted the change; a local race is log-worthy
                // but not fatal
                error!(file = %id, error = %err, "Local transition failed after server accepted");
            } else {
                let entry = SnapshotEntry::from(&*record);
                state.snapshot_cache.insert(id.clone(), entry);
            }
        }
        info!(file = %id, status = %target, "Review decision recorded");
        Ok(())
    }

    /// Deletes the record's upload on the server and drops it locally
    pub async fn delete_file(&self, id: &FileId) -> Result<(), SyncError> {
        let record = self
            .get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()))?;
        let uuid = record
            .upload_uuid
            .ok_or_else(|| DomainError::InvalidUploadUuid(id.to_string()))?;

        self.backend.delete_audio(&uuid).await?;
        self.remove_file(id).await;
        info!(file = %id, "File deleted");
        Ok(())
    }

    /// Requeues processing for a failed or unavailable record
    ///
    /// On success the record flips back to `Processing` with the new task
    /// reference, so the next pass starts tracking progress again.
    pub async fn retry_file(&self, id: &FileId) -> Result<(), SyncError> {
        let record = self
            .get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()))?;
        let uuid = record
            .upload_uuid
            .ok_or_else(|| DomainError::InvalidUploadUuid(id.to_string()))?;

        let receipt = self.backend.reprocess_audio(&uuid).await?;
        let status = FileStatus::Processing;
        self.update_file(
            id,
            FileUpdate {
                status: Some(status),
                status_display: Some(status.label().to_string()),
                progress: Some(0.0),
                task_id: receipt.task_id.and_then(|t| TaskId::new(t).ok()),
                ..FileUpdate::default()
            },
        )
        .await;
        info!(file = %id, "Reprocessing requested");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transcript actions
    // ------------------------------------------------------------------

    /// Fetches the transcript texts for one record and caches them locally
    pub async fn load_text(&self, id: &FileId) -> Result<FileRecord, SyncError> {
        let record = self
            .get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()))?;
        let uuid = record
            .upload_uuid
            .clone()
            .ok_or_else(|| DomainError::InvalidUploadUuid(id.to_string()))?;

        let text = self.backend.fetch_audio_text(&uuid).await?;

        let mut state = self.state.write().await;
        if let Some(record) = state.files.iter_mut().find(|r| &r.id == id) {
            if !text.original_text.is_empty() {
                record.original_text = Some(text.original_text);
            }
            record.processed_text = text.processed_text.or(record.processed_text.take());
            if record.edited_text.is_none() {
                record.edited_text = text.custom_text;
            }
            return Ok(record.clone());
        }
        Err(DomainError::UnknownFile(id.to_string()).into())
    }

    /// Saves an edited transcript on the server and locally
    pub async fn save_text(&self, id: &FileId, text: &str) -> Result<(), SyncError> {
        let record = self
            .get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()))?;
        let uuid = record
            .upload_uuid
            .ok_or_else(|| DomainError::InvalidUploadUuid(id.to_string()))?;

        self.backend.update_audio_text(&uuid, text).await?;
        self.update_file(
            id,
            FileUpdate {
                edited_text: Some(text.to_string()),
                ..FileUpdate::default()
            },
        )
        .await;
        Ok(())
    }

    /// Downloads the reviewed transcript as a document archive
    ///
    /// Only records the server knows about can be exported; a local
    /// optimistic id has nothing to export yet.
    pub async fn export_file(&self, id: &FileId) -> Result<ExportArchive, SyncError> {
        self.get_file_by_id(id)
            .await
            .ok_or_else(|| DomainError::UnknownFile(id.to_string()))?;

        let archive = self.backend.export_transcript_zip(id).await?;
        info!(file = %id, bytes = archive.bytes.len(), "Transcript archive downloaded");
        Ok(archive)
    }
}
