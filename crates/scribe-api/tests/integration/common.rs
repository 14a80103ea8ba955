//! Shared test helpers for backend API integration tests
//!
//! Provides wiremock-based mock server setup for the pipeline endpoints.
//! Each helper mounts the necessary mock endpoints and returns a configured
//! ApiClient pointing at the mock server.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scribe_api::client::ApiClient;

/// Starts a mock server and returns it with a client pointed at it.
pub async fn setup_api_mock() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(server.uri(), "test-access-token").expect("client builds");
    (server, client)
}

/// Builds one dashboard item JSON object.
pub fn dashboard_item(
    id: i64,
    file_name: &str,
    status: &str,
    status_display: &str,
    task_id: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "file_name": file_name,
        "uploaded_at": "2025-11-03T09:15:00Z",
        "file_type_display": "Meeting minutes",
        "status": status,
        "status_display": status_display,
        "subset_title": "Operations",
        "upload_uuid": format!("uuid-{id}"),
        "task_id": task_id,
    })
}

/// Mounts the dashboard endpoint returning the given items.
pub async fn mount_dashboard(server: &MockServer, items: Vec<serde_json::Value>) {
    let total = items.len();
    Mock::given(method("GET"))
        .and(path("/api/v1/main/dashboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": items,
            "counts": {"AP": 0, "P": 0, "PD": 0, "SU": 0, "A": 0, "E": 0, "R": 0},
            "total": total,
        })))
        .mount(server)
        .await;
}

/// Mounts a task progress endpoint for one task id.
pub async fn mount_task_progress(server: &MockServer, task_id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/files/task/{task_id}/progress/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A typical in-flight progress body.
pub fn progress_body(progress: serde_json::Value, status: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "task_id": "celery-1",
        "state": "PROGRESS",
        "progress": progress,
        "status": status,
        "is_completed": false,
        "is_failed": false,
    })
}
