//! Typed endpoint calls and wire DTOs
//!
//! The backend is a Django REST service; these structs mirror its exact
//! response shapes. Conversion into the port-level DTOs from
//! `scribe_core::ports::backend` happens here so the rest of the workspace
//! never sees wire quirks (numeric ids, snake_case flags, string-or-number
//! progress values).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use scribe_core::ports::backend::{
    AudioText, DashboardItem, DashboardSnapshot, ExportArchive, FileStatusReport, ProgressValue,
    ReprocessReceipt, StatusCounts, TaskProgress,
};

use crate::client::ApiClient;

// ============================================================================
// Wire response types
// ============================================================================

/// Response from `GET /main/dashboard/`
#[derive(Debug, Deserialize)]
struct WireDashboardResponse {
    items: Vec<WireAudioFileItem>,
    #[serde(default)]
    counts: StatusCounts,
    #[serde(default)]
    total: u64,
}

/// One audio file entry in the dashboard listing
///
/// `id` is the numeric database primary key; the port DTO carries it as a
/// string so optimistic local ids share the same type.
#[derive(Debug, Deserialize)]
struct WireAudioFileItem {
    id: i64,
    file_name: String,
    uploaded_at: DateTime<Utc>,
    #[serde(default)]
    file_type_display: String,
    status: String,
    #[serde(default)]
    status_display: String,
    #[serde(default)]
    subset_title: String,
    #[serde(default)]
    upload_uuid: Option<String>,
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
}

impl From<WireAudioFileItem> for DashboardItem {
    fn from(item: WireAudioFileItem) -> Self {
        DashboardItem {
            id: item.id.to_string(),
            file_name: item.file_name,
            uploaded_at: item.uploaded_at,
            file_type_display: item.file_type_display,
            status: item.status,
            status_display: item.status_display,
            subset_title: item.subset_title,
            upload_uuid: item.upload_uuid,
            task_id: item.task_id,
            uploader: item.uploader,
        }
    }
}

/// Response from `GET /files/task/{task_id}/progress/`
#[derive(Debug, Deserialize)]
struct WireTaskProgress {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    state: String,
    #[serde(default)]
    progress: ProgressValue,
    #[serde(default)]
    status: String,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    is_failed: bool,
}

impl From<WireTaskProgress> for TaskProgress {
    fn from(wire: WireTaskProgress) -> Self {
        TaskProgress {
            success: wire.success,
            state: wire.state,
            progress: wire.progress,
            status: wire.status,
            is_completed: wire.is_completed,
            is_failed: wire.is_failed,
        }
    }
}

/// Response from `GET /files/audio/{id}/status/`
#[derive(Debug, Deserialize)]
struct WireFileStatus {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    file_name: String,
    current_status: String,
    #[serde(default)]
    status_display: String,
    #[serde(default)]
    has_text_record: bool,
}

impl From<WireFileStatus> for FileStatusReport {
    fn from(wire: WireFileStatus) -> Self {
        FileStatusReport {
            success: wire.success,
            file_name: wire.file_name,
            current_status: wire.current_status,
            status_display: wire.status_display,
            has_text_record: wire.has_text_record,
        }
    }
}

/// Response from `GET /files/audio/{uuid}/text/`
#[derive(Debug, Deserialize)]
struct WireAudioText {
    #[serde(default)]
    file_name: String,
    #[serde(default)]
    original_text: String,
    #[serde(default)]
    processed_text: Option<String>,
    #[serde(default)]
    custom_text: Option<String>,
}

impl From<WireAudioText> for AudioText {
    fn from(wire: WireAudioText) -> Self {
        AudioText {
            file_name: wire.file_name,
            original_text: wire.original_text,
            processed_text: wire.processed_text,
            custom_text: wire.custom_text.filter(|t| !t.is_empty()),
        }
    }
}

/// Response from `POST /files/audio/{uuid}/reprocess/`
#[derive(Debug, Deserialize)]
struct WireReprocess {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ============================================================================
// Endpoint calls
// ============================================================================

impl ApiClient {
    /// `GET /main/dashboard/` - the authoritative file listing
    pub async fn get_dashboard(&self) -> Result<DashboardSnapshot> {
        debug!("Fetching dashboard snapshot");

        let wire: WireDashboardResponse = self
            .request(Method::GET, "/main/dashboard/")
            .send()
            .await
            .context("Failed to fetch dashboard")?
            .error_for_status()
            .context("Dashboard request returned error status")?
            .json()
            .await
            .context("Failed to parse dashboard response")?;

        debug!(items = wire.items.len(), total = wire.total, "Dashboard fetched");

        Ok(DashboardSnapshot {
            items: wire.items.into_iter().map(Into::into).collect(),
            counts: wire.counts,
            total: wire.total,
        })
    }

    /// `GET /files/task/{task_id}/progress/` - per-task progress
    pub async fn get_task_progress(&self, task_id: &str) -> Result<TaskProgress> {
        let path = format!("/files/task/{task_id}/progress/");

        let wire: WireTaskProgress = self
            .request(Method::GET, &path)
            .send()
            .await
            .context("Failed to fetch task progress")?
            .error_for_status()
            .context("Task progress request returned error status")?
            .json()
            .await
            .context("Failed to parse task progress response")?;

        Ok(wire.into())
    }

    /// `GET /files/audio/{id}/status/` - targeted single-file status check
    pub async fn check_file_status(&self, file_id: &str) -> Result<FileStatusReport> {
        let path = format!("/files/audio/{file_id}/status/");

        let wire: WireFileStatus = self
            .request(Method::GET, &path)
            .send()
            .await
            .context("Failed to fetch file status")?
            .error_for_status()
            .context("File status request returned error status")?
            .json()
            .await
            .context("Failed to parse file status response")?;

        Ok(wire.into())
    }

    /// `PUT /files/audio/{id}/status/` - approve/reject a file
    pub async fn update_audio_status(&self, file_id: &str, status_code: &str) -> Result<()> {
        let path = format!("/files/audio/{file_id}/status/");
        debug!(file_id, status_code, "Updating audio status");

        self.request(Method::PUT, &path)
            .json(&serde_json::json!({ "status": status_code }))
            .send()
            .await
            .context("Failed to send status update")?
            .error_for_status()
            .context("Status update returned error status")?;

        Ok(())
    }

    /// `DELETE /files/audio/{uuid}/` - remove a file and dequeue its task
    pub async fn delete_audio_file(&self, upload_uuid: &str) -> Result<()> {
        let path = format!("/files/audio/{upload_uuid}/");
        debug!(upload_uuid, "Deleting audio file");

        self.request(Method::DELETE, &path)
            .send()
            .await
            .context("Failed to send delete request")?
            .error_for_status()
            .context("Delete request returned error status")?;

        Ok(())
    }

    /// `POST /files/audio/{uuid}/reprocess/` - requeue after a service failure
    pub async fn reprocess_audio(&self, upload_uuid: &str) -> Result<ReprocessReceipt> {
        let path = format!("/files/audio/{upload_uuid}/reprocess/");
        debug!(upload_uuid, "Requesting reprocess");

        let wire: WireReprocess = self
            .request(Method::POST, &path)
            .send()
            .await
            .context("Failed to send reprocess request")?
            .error_for_status()
            .context("Reprocess request returned error status")?
            .json()
            .await
            .context("Failed to parse reprocess response")?;

        Ok(ReprocessReceipt {
            success: wire.success,
            task_id: wire.task_id,
            message: wire.message,
        })
    }

    /// `GET /files/audio/{uuid}/text/` - transcript texts for review
    pub async fn get_audio_text(&self, upload_uuid: &str) -> Result<AudioText> {
        let path = format!("/files/audio/{upload_uuid}/text/");

        let wire: WireAudioText = self
            .request(Method::GET, &path)
            .send()
            .await
            .context("Failed to fetch audio text")?
            .error_for_status()
            .context("Audio text request returned error status")?
            .json()
            .await
            .context("Failed to parse audio text response")?;

        Ok(wire.into())
    }

    /// `PUT /files/audio/{uuid}/text/update/` - save a staff-edited transcript
    pub async fn update_audio_text(&self, upload_uuid: &str, custom_text: &str) -> Result<()> {
        let path = format!("/files/audio/{upload_uuid}/text/update/");

        self.request(Method::PUT, &path)
            .json(&serde_json::json!({ "custom_text": custom_text }))
            .send()
            .await
            .context("Failed to send text update")?
            .error_for_status()
            .context("Text update returned error status")?;

        Ok(())
    }

    /// `POST /office/export-custom-zip/` - reviewed transcript as DOCX+PDF ZIP
    ///
    /// The server keys exports by the numeric audio id, so locally
    /// synthesized ids are rejected before any request is made.
    pub async fn export_transcript_zip(&self, file_id: &str) -> Result<ExportArchive> {
        let audio_id: i64 = file_id
            .parse()
            .with_context(|| format!("File id {file_id} has no server-side export"))?;
        debug!(audio_id, "Requesting transcript export");

        let bytes = self
            .request(Method::POST, "/office/export-custom-zip/")
            .json(&serde_json::json!({ "audio_id": audio_id }))
            .send()
            .await
            .context("Failed to request transcript export")?
            .error_for_status()
            .context("Transcript export returned error status")?
            .bytes()
            .await
            .context("Failed to download export archive")?;

        Ok(ExportArchive {
            file_name: format!("custom_content_{audio_id}.zip"),
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_item_deserialization() {
        let json = r#"{
            "id": 12,
            "file_name": "minutes.mp3",
            "uploaded_at": "2025-11-03T09:15:00Z",
            "file_type_display": "Meeting minutes",
            "status": "P",
            "status_display": "Processing",
            "subset_title": "Operations",
            "upload_uuid": "0b7e-1f",
            "task_id": "celery-42"
        }"#;

        let item: WireAudioFileItem = serde_json::from_str(json).unwrap();
        let port: DashboardItem = item.into();
        assert_eq!(port.id, "12");
        assert_eq!(port.status, "P");
        assert_eq!(port.task_id.as_deref(), Some("celery-42"));
    }

    #[test]
    fn test_dashboard_item_minimal_fields() {
        let json = r#"{
            "id": 3,
            "file_name": "a.mp3",
            "uploaded_at": "2025-11-03T09:15:00Z",
            "status": "AP"
        }"#;

        let item: WireAudioFileItem = serde_json::from_str(json).unwrap();
        assert!(item.task_id.is_none());
        assert!(item.upload_uuid.is_none());
        assert_eq!(item.status_display, "");
    }

    #[test]
    fn test_task_progress_numeric_and_string() {
        let numeric = r#"{"success": true, "state": "PROGRESS", "progress": 37,
                          "status": "Transcribing", "is_completed": false, "is_failed": false}"#;
        let wire: WireTaskProgress = serde_json::from_str(numeric).unwrap();
        assert_eq!(wire.progress, ProgressValue::Number(37.0));

        let string = r#"{"success": true, "state": "PROGRESS", "progress": "42%",
                         "status": "Transcribing", "is_completed": false, "is_failed": false}"#;
        let wire: WireTaskProgress = serde_json::from_str(string).unwrap();
        assert_eq!(wire.progress, ProgressValue::Text("42%".to_string()));
    }

    #[test]
    fn test_task_progress_defaults() {
        // A degenerate body must still deserialize; every field has a default
        let wire: WireTaskProgress = serde_json::from_str("{}").unwrap();
        assert!(!wire.success);
        assert_eq!(wire.progress, ProgressValue::Number(0.0));
    }

    #[test]
    fn test_audio_text_empty_custom_text_is_none() {
        let json = r#"{"file_name": "a.mp3", "original_text": "raw", "custom_text": ""}"#;
        let wire: WireAudioText = serde_json::from_str(json).unwrap();
        let port: AudioText = wire.into();
        assert!(port.custom_text.is_none());
    }
}
