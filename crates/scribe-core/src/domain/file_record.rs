//! FileRecord domain entity
//!
//! A `FileRecord` represents one uploaded audio file's journey through the
//! transcription pipeline, from optimistic local insertion (or first server
//! observation) through processing, review, and approval.
//!
//! Records are created two ways:
//! 1. **Optimistic insert** - shown immediately after a successful upload
//!    submission, before the server confirms it, with a synthesized local id.
//! 2. **Server conversion** - built from a dashboard snapshot during a sync
//!    pass.
//!
//! Sync passes mutate records by *merging*, never by destructive overwrite:
//! fields the server does not report (transcript texts, in-flight progress)
//! survive the merge. A record leaves the store only through an explicit
//! local removal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{FileId, TaskId, UploadUuid};
use super::status::FileStatus;

// ============================================================================
// FileRecord
// ============================================================================

/// One audio file's view-model state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Stable identifier, unique within the store
    pub id: FileId,
    /// Display name, immutable after creation
    pub name: String,
    /// Current lifecycle state
    pub status: FileStatus,
    /// Human-readable status label, server-sourced when available
    pub status_display: String,
    /// Async processing task reference; present only while `Processing`
    pub task_id: Option<TaskId>,
    /// Completion percentage (0-100); meaningful only while `Processing`
    pub progress: Option<f64>,
    /// Short description of the current processing step
    pub progress_label: Option<String>,
    /// Creation timestamp, set once
    pub uploaded_at: DateTime<Utc>,
    /// Human-readable file type (e.g. "Meeting minutes")
    pub file_type: String,
    /// Sub-collection this file belongs to
    pub subset: String,
    /// Server-side upload handle for delete/reprocess/text operations
    pub upload_uuid: Option<UploadUuid>,
    /// Raw transcript as produced by the speech engine
    pub original_text: Option<String>,
    /// Pipeline-structured transcript
    pub processed_text: Option<String>,
    /// Staff-edited transcript; the only text field a human can overwrite
    pub edited_text: Option<String>,
    /// Who uploaded the file
    pub uploader: Option<String>,
}

impl FileRecord {
    /// Creates an optimistic local record for a just-submitted upload
    ///
    /// The record starts in `Processing` with a synthesized local id; the
    /// next sync pass replaces it with the server's authoritative version.
    pub fn optimistic(
        name: impl Into<String>,
        file_type: impl Into<String>,
        subset: impl Into<String>,
    ) -> Self {
        let status = FileStatus::Processing;
        Self {
            id: FileId::local(),
            name: name.into(),
            status,
            status_display: status.label().to_string(),
            task_id: None,
            progress: None,
            progress_label: None,
            uploaded_at: Utc::now(),
            file_type: file_type.into(),
            subset: subset.into(),
            upload_uuid: None,
            original_text: None,
            processed_text: None,
            edited_text: None,
            uploader: None,
        }
    }

    /// Merges a freshly converted server record into this one
    ///
    /// Server-reported fields win; locally populated fields the server does
    /// not carry (transcript texts, in-flight progress) are preserved.
    /// Progress is cleared the moment status leaves `Processing`, since it is
    /// only trusted in that state.
    pub fn merge_server(&mut self, incoming: FileRecord) {
        debug_assert_eq!(self.id, incoming.id, "merge must be keyed by id");

        self.name = incoming.name;
        self.status = incoming.status;
        self.status_display = incoming.status_display;
        self.file_type = incoming.file_type;
        self.subset = incoming.subset;
        self.uploader = incoming.uploader.or(self.uploader.take());
        if incoming.upload_uuid.is_some() {
            self.upload_uuid = incoming.upload_uuid;
        }

        if self.status == FileStatus::Processing {
            // Progress belongs to a task, not the file; a reprocessed file
            // with a new task starts over from that task's own readings
            let task_changed = incoming.task_id.is_some() && incoming.task_id != self.task_id;
            if task_changed {
                self.task_id = incoming.task_id;
                self.progress = incoming.progress;
                self.progress_label = incoming.progress_label;
            } else {
                self.task_id = incoming.task_id.or(self.task_id.take());
                if incoming.progress.is_some() {
                    self.progress = incoming.progress;
                }
                if incoming.progress_label.is_some() {
                    self.progress_label = incoming.progress_label;
                }
            }
        } else {
            self.task_id = None;
            self.progress = None;
            self.progress_label = None;
        }

        if incoming.original_text.is_some() {
            self.original_text = incoming.original_text;
        }
        if incoming.processed_text.is_some() {
            self.processed_text = incoming.processed_text;
        }
        // edited_text is human-owned; the server merge never clobbers it
        if self.edited_text.is_none() {
            self.edited_text = incoming.edited_text;
        }
    }

    /// Applies a partial update (shallow merge of the provided fields)
    pub fn apply_update(&mut self, update: FileUpdate) {
        if let Some(status) = update.status {
            self.status = status;
            if self.status != FileStatus::Processing {
                self.task_id = None;
                self.progress = None;
                self.progress_label = None;
            }
        }
        if let Some(display) = update.status_display {
            self.status_display = display;
        }
        if let Some(progress) = update.progress {
            self.progress = Some(progress);
        }
        if let Some(label) = update.progress_label {
            self.progress_label = Some(label);
        }
        if let Some(task_id) = update.task_id {
            self.task_id = Some(task_id);
        }
        if let Some(text) = update.edited_text {
            self.edited_text = Some(text);
        }
    }

    /// Marks the record approved via an explicit local action
    ///
    /// Only legal from a reviewable state; the client never invents a
    /// terminal state for a file the pipeline has not finished.
    pub fn approve(&mut self) -> Result<(), DomainError> {
        self.transition_terminal(FileStatus::Approved)
    }

    /// Marks the record rejected via an explicit local action
    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.transition_terminal(FileStatus::Rejected)
    }

    fn transition_terminal(&mut self, target: FileStatus) -> Result<(), DomainError> {
        if !self.status.is_reviewable() {
            return Err(DomainError::InvalidTransition {
                from: self.status.label().to_string(),
                to: target.label().to_string(),
            });
        }
        self.status = target;
        self.status_display = target.label().to_string();
        self.progress = None;
        self.progress_label = None;
        self.task_id = None;
        Ok(())
    }

    /// Progress is only trusted while the record is `Processing`
    pub fn effective_progress(&self) -> Option<f64> {
        if self.status == FileStatus::Processing {
            self.progress
        } else {
            None
        }
    }

    /// The best transcript available for review display
    ///
    /// Edited text takes precedence over the pipeline output, which takes
    /// precedence over the raw transcript.
    pub fn review_text(&self) -> Option<&str> {
        self.edited_text
            .as_deref()
            .or(self.processed_text.as_deref())
            .or(self.original_text.as_deref())
    }
}

// ============================================================================
// FileUpdate
// ============================================================================

/// Partial field set for [`FileRecord::apply_update`]
///
/// Every field is optional; absent fields leave the record untouched.
#[derive(Debug, Clone, Default)]
pub struct FileUpdate {
    pub status: Option<FileStatus>,
    pub status_display: Option<String>,
    pub progress: Option<f64>,
    pub progress_label: Option<String>,
    pub task_id: Option<TaskId>,
    pub edited_text: Option<String>,
}

// ============================================================================
// FileStats
// ============================================================================

/// Per-status record counts for the dashboard summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub processed: usize,
    pub approved: usize,
    pub unavailable: usize,
    pub rejected: usize,
}

impl FileStats {
    /// Tallies counts over a record slice
    pub fn collect(records: &[FileRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.status {
                FileStatus::Pending => stats.pending += 1,
                FileStatus::Processing => stats.processing += 1,
                FileStatus::Processed => stats.processed += 1,
                FileStatus::Approved => stats.approved += 1,
                FileStatus::ServiceUnavailable => stats.unavailable += 1,
                FileStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }
}
