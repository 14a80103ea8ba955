//! BackendProvider - IBackendApi implementation over the HTTP client
//!
//! Wraps the [`ApiClient`] and delegates to the typed endpoint calls to
//! fulfil the [`IBackendApi`] port contract.
//!
//! ## Design Notes
//!
//! - The provider is stateless beyond the client; construct one and share it
//!   as `Arc<dyn IBackendApi>`.
//! - No internal retries: the sync engine's poll loop is the retry policy
//!   for transient failures.

use anyhow::Result;

use scribe_core::domain::newtypes::{FileId, TaskId, UploadUuid};
use scribe_core::ports::backend::{
    AudioText, DashboardSnapshot, ExportArchive, FileStatusReport, IBackendApi, ReprocessReceipt,
    TaskProgress,
};

use crate::client::ApiClient;

/// [`IBackendApi`] adapter backed by the pipeline's HTTP API
pub struct BackendProvider {
    client: ApiClient,
}

impl BackendProvider {
    /// Creates a provider around an existing client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IBackendApi for BackendProvider {
    async fn fetch_dashboard(&self) -> Result<DashboardSnapshot> {
        self.client.get_dashboard().await
    }

    async fn fetch_task_progress(&self, task_id: &TaskId) -> Result<TaskProgress> {
        self.client.get_task_progress(task_id.as_str()).await
    }

    async fn fetch_file_status(&self, file_id: &FileId) -> Result<FileStatusReport> {
        self.client.check_file_status(file_id.as_str()).await
    }

    async fn set_file_status(&self, file_id: &FileId, status_code: &str) -> Result<()> {
        self.client
            .update_audio_status(file_id.as_str(), status_code)
            .await
    }

    async fn delete_audio(&self, upload_uuid: &UploadUuid) -> Result<()> {
        self.client.delete_audio_file(upload_uuid.as_str()).await
    }

    async fn reprocess_audio(&self, upload_uuid: &UploadUuid) -> Result<ReprocessReceipt> {
        self.client.reprocess_audio(upload_uuid.as_str()).await
    }

    async fn fetch_audio_text(&self, upload_uuid: &UploadUuid) -> Result<AudioText> {
        self.client.get_audio_text(upload_uuid.as_str()).await
    }

    async fn update_audio_text(&self, upload_uuid: &UploadUuid, custom_text: &str) -> Result<()> {
        self.client
            .update_audio_text(upload_uuid.as_str(), custom_text)
            .await
    }

    async fn export_transcript_zip(&self, file_id: &FileId) -> Result<ExportArchive> {
        self.client.export_transcript_zip(file_id.as_str()).await
    }
}
