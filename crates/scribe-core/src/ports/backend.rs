//! Backend API port (driven/secondary port)
//!
//! This module defines the interface to the transcription pipeline backend.
//! The backend is an opaque external collaborator: this subsystem consumes
//! its HTTP contract and invents no wire format of its own.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because transport errors are adapter-specific;
//!   the sync engine treats every failure here as transient (§ error
//!   taxonomy in the crate docs).
//! - DTOs are port-level shapes, not raw wire structs. The HTTP adapter in
//!   `scribe-api` owns deserialization and converts into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::newtypes::{FileId, TaskId, UploadUuid};

// ============================================================================
// Dashboard DTOs
// ============================================================================

/// One file entry as reported by the dashboard endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardItem {
    /// Server-assigned identifier (stringified primary key)
    pub id: String,
    /// Display file name
    pub file_name: String,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
    /// Human-readable file type
    pub file_type_display: String,
    /// Short status code (e.g. "AP", "P", "PD")
    pub status: String,
    /// Human-readable status label
    pub status_display: String,
    /// Sub-collection title
    pub subset_title: String,
    /// Upload handle for delete/reprocess/text operations
    pub upload_uuid: Option<String>,
    /// Processing task reference, present while the file is being processed
    pub task_id: Option<String>,
    /// Uploader display name
    pub uploader: Option<String>,
}

/// Aggregate per-status counts reported alongside the item list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(rename = "AP")]
    pub pending: u64,
    #[serde(rename = "P")]
    pub processing: u64,
    #[serde(rename = "PD")]
    pub processed: u64,
    #[serde(rename = "SU")]
    pub unavailable: u64,
    #[serde(rename = "A")]
    pub approved: u64,
    #[serde(rename = "E")]
    pub error: u64,
    #[serde(rename = "R")]
    pub rejected: u64,
}

/// Full authoritative dashboard snapshot for one sync pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub items: Vec<DashboardItem>,
    #[serde(default)]
    pub counts: StatusCounts,
    #[serde(default)]
    pub total: u64,
}

impl Default for DashboardItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            file_name: String::new(),
            uploaded_at: Utc::now(),
            file_type_display: String::new(),
            status: String::new(),
            status_display: String::new(),
            subset_title: String::new(),
            upload_uuid: None,
            task_id: None,
            uploader: None,
        }
    }
}

// ============================================================================
// Task progress DTOs
// ============================================================================

/// Raw progress value as sent by the backend
///
/// The progress endpoint is loose about this field: Celery task metadata may
/// carry a JSON number or a percentage-formatted string ("42%"), depending
/// on which worker produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgressValue {
    Number(f64),
    Text(String),
}

impl Default for ProgressValue {
    fn default() -> Self {
        ProgressValue::Number(0.0)
    }
}

/// Task-level progress report for one processing task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub success: bool,
    /// Celery task state (PENDING, PROGRESS, SUCCESS, FAILURE, ...)
    pub state: String,
    /// Raw progress value; see [`ProgressValue`]
    pub progress: ProgressValue,
    /// Human-readable step description
    pub status: String,
    pub is_completed: bool,
    pub is_failed: bool,
}

// ============================================================================
// Per-file status / text DTOs
// ============================================================================

/// Targeted status check for a single file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStatusReport {
    pub success: bool,
    pub file_name: String,
    /// Short status code, same vocabulary as the dashboard
    pub current_status: String,
    pub status_display: String,
    pub has_text_record: bool,
}

/// Transcript texts for a reviewed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioText {
    pub file_name: String,
    pub original_text: String,
    pub processed_text: Option<String>,
    pub custom_text: Option<String>,
}

/// Acknowledgement for a reprocess request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReprocessReceipt {
    pub success: bool,
    pub task_id: Option<String>,
    pub message: Option<String>,
}

/// Downloaded export bundle (DOCX and PDF renditions zipped together)
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArchive {
    /// Suggested file name for saving the archive
    pub file_name: String,
    /// Raw ZIP bytes
    pub bytes: Vec<u8>,
}

// ============================================================================
// IBackendApi trait
// ============================================================================

/// Port trait for the transcription pipeline backend
///
/// ## Implementation Notes
///
/// - All methods are read-or-act round trips; none of them stream.
/// - Implementations should not retry internally: the sync engine decides
///   retry policy (the poll loop itself is the retry).
/// - `fetch_task_progress` failures are soft for callers; the engine keeps
///   the previous progress and carries on.
#[async_trait::async_trait]
pub trait IBackendApi: Send + Sync {
    /// Fetches the authoritative dashboard listing
    async fn fetch_dashboard(&self) -> anyhow::Result<DashboardSnapshot>;

    /// Fetches progress for a processing task
    async fn fetch_task_progress(&self, task_id: &TaskId) -> anyhow::Result<TaskProgress>;

    /// Fetches the current status of a single file
    async fn fetch_file_status(&self, file_id: &FileId) -> anyhow::Result<FileStatusReport>;

    /// Sets a file's status code (approve/reject actions)
    async fn set_file_status(&self, file_id: &FileId, status_code: &str) -> anyhow::Result<()>;

    /// Deletes an uploaded file (also removes it from the processing queue)
    async fn delete_audio(&self, upload_uuid: &UploadUuid) -> anyhow::Result<()>;

    /// Requeues a file for processing after a service failure
    async fn reprocess_audio(&self, upload_uuid: &UploadUuid) -> anyhow::Result<ReprocessReceipt>;

    /// Fetches the transcript texts for review
    async fn fetch_audio_text(&self, upload_uuid: &UploadUuid) -> anyhow::Result<AudioText>;

    /// Saves a staff-edited transcript
    async fn update_audio_text(
        &self,
        upload_uuid: &UploadUuid,
        custom_text: &str,
    ) -> anyhow::Result<()>;

    /// Downloads the reviewed transcript as a document archive
    async fn export_transcript_zip(&self, file_id: &FileId) -> anyhow::Result<ExportArchive>;
}
