//! Status mutation, delete, reprocess, and text endpoint tests
//!
//! These go through the BackendProvider so the port-level conversions are
//! exercised too.

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use scribe_core::domain::newtypes::{FileId, UploadUuid};
use scribe_core::ports::backend::IBackendApi;
use scribe_api::provider::BackendProvider;

use crate::common::setup_api_mock;

#[tokio::test]
async fn test_approve_sends_status_code() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/files/audio/7/status/"))
        .and(body_json(serde_json::json!({"status": "A"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "message": "updated",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = BackendProvider::new(client);
    provider
        .set_file_status(&FileId::new("7"), "A")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_audio() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/files/audio/uuid-7/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let provider = BackendProvider::new(client);
    let uuid = UploadUuid::new("uuid-7").unwrap();
    provider.delete_audio(&uuid).await.unwrap();
}

#[tokio::test]
async fn test_reprocess_returns_receipt() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/files/audio/uuid-9/reprocess/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "success": true,
            "task_id": "celery-new",
            "audio_id": 9,
            "message": "requeued",
        })))
        .mount(&server)
        .await;

    let provider = BackendProvider::new(client);
    let uuid = UploadUuid::new("uuid-9").unwrap();
    let receipt = provider.reprocess_audio(&uuid).await.unwrap();
    assert!(receipt.success);
    assert_eq!(receipt.task_id.as_deref(), Some("celery-new"));
}

#[tokio::test]
async fn test_fetch_audio_text_precedence_fields() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/files/audio/uuid-3/text/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "audio_id": 3,
            "file_name": "lesson.mp3",
            "status": "PD",
            "original_text": "raw transcript",
            "processed_text": "structured transcript",
            "custom_text": "",
            "has_custom_text": false,
        })))
        .mount(&server)
        .await;

    let provider = BackendProvider::new(client);
    let uuid = UploadUuid::new("uuid-3").unwrap();
    let text = provider.fetch_audio_text(&uuid).await.unwrap();
    assert_eq!(text.original_text, "raw transcript");
    assert_eq!(text.processed_text.as_deref(), Some("structured transcript"));
    // Empty custom text is normalized away
    assert!(text.custom_text.is_none());
}

#[tokio::test]
async fn test_update_audio_text() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/files/audio/uuid-3/text/update/"))
        .and(body_json(serde_json::json!({"custom_text": "fixed transcript"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = BackendProvider::new(client);
    let uuid = UploadUuid::new("uuid-3").unwrap();
    provider
        .update_audio_text(&uuid, "fixed transcript")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_error_propagates() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/files/audio/uuid-404/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = BackendProvider::new(client);
    let uuid = UploadUuid::new("uuid-404").unwrap();
    assert!(provider.delete_audio(&uuid).await.is_err());
}

#[tokio::test]
async fn test_export_transcript_zip_downloads_archive() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/office/export-custom-zip/"))
        .and(body_json(serde_json::json!({"audio_id": 12})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(b"PK\x03\x04fake-zip".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = BackendProvider::new(client);
    let archive = provider
        .export_transcript_zip(&FileId::new("12"))
        .await
        .unwrap();

    assert_eq!(archive.file_name, "custom_content_12.zip");
    assert!(archive.bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_export_rejects_local_ids_without_a_request() {
    let (server, client) = setup_api_mock().await;

    // No mock mounted; a request would 404 but none must be sent
    drop(server);

    let provider = BackendProvider::new(client);
    let result = provider
        .export_transcript_zip(&FileId::local())
        .await;
    assert!(result.is_err());
}
