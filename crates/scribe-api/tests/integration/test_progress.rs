//! Task progress and file status endpoint integration tests

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use scribe_core::ports::backend::ProgressValue;

use crate::common::{mount_task_progress, progress_body, setup_api_mock};

#[tokio::test]
async fn test_task_progress_numeric() {
    let (server, client) = setup_api_mock().await;
    mount_task_progress(
        &server,
        "celery-1",
        progress_body(serde_json::json!(37), "Transcribing"),
    )
    .await;

    let progress = client.get_task_progress("celery-1").await.unwrap();
    assert!(progress.success);
    assert_eq!(progress.state, "PROGRESS");
    assert_eq!(progress.progress, ProgressValue::Number(37.0));
    assert_eq!(progress.status, "Transcribing");
    assert!(!progress.is_completed);
}

#[tokio::test]
async fn test_task_progress_percent_string() {
    let (server, client) = setup_api_mock().await;
    mount_task_progress(
        &server,
        "celery-2",
        progress_body(serde_json::json!("42%"), "Transcribing chunk 3"),
    )
    .await;

    let progress = client.get_task_progress("celery-2").await.unwrap();
    assert_eq!(progress.progress, ProgressValue::Text("42%".to_string()));
}

#[tokio::test]
async fn test_task_progress_completed_shape() {
    let (server, client) = setup_api_mock().await;
    mount_task_progress(
        &server,
        "celery-3",
        serde_json::json!({
            "success": true,
            "task_id": "celery-3",
            "state": "SUCCESS",
            "progress": 100,
            "status": "Processing complete",
            "is_completed": true,
            "is_failed": false,
            "result": {"audio_id": 9},
        }),
    )
    .await;

    let progress = client.get_task_progress("celery-3").await.unwrap();
    assert!(progress.is_completed);
    assert_eq!(progress.progress, ProgressValue::Number(100.0));
}

#[tokio::test]
async fn test_task_progress_failure_shape() {
    let (server, client) = setup_api_mock().await;
    mount_task_progress(
        &server,
        "celery-4",
        serde_json::json!({
            "success": false,
            "task_id": "celery-4",
            "state": "FAILURE",
            "progress": 0,
            "status": "Processing error",
            "is_completed": false,
            "is_failed": true,
            "error": "worker lost",
        }),
    )
    .await;

    let progress = client.get_task_progress("celery-4").await.unwrap();
    assert!(progress.is_failed);
    assert!(!progress.success);
}

#[tokio::test]
async fn test_check_file_status() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/files/audio/7/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "audio_id": 7,
            "file_name": "minutes.mp3",
            "current_status": "PD",
            "status_display": "Content generated",
            "has_text_record": true,
            "is_processing": false,
            "is_completed": false,
            "is_rejected": false,
        })))
        .mount(&server)
        .await;

    let report = client.check_file_status("7").await.unwrap();
    assert!(report.success);
    assert_eq!(report.current_status, "PD");
    assert!(report.has_text_record);
}

#[tokio::test]
async fn test_task_progress_http_error_is_err() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/files/task/gone/progress/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client.get_task_progress("gone").await.is_err());
}
