//! Dashboard endpoint integration tests

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{dashboard_item, mount_dashboard, setup_api_mock};

#[tokio::test]
async fn test_get_dashboard_parses_items() {
    let (server, client) = setup_api_mock().await;
    mount_dashboard(
        &server,
        vec![
            dashboard_item(1, "minutes.mp3", "P", "Processing", Some("celery-1")),
            dashboard_item(2, "lesson.mp3", "A", "Approved", None),
        ],
    )
    .await;

    let snapshot = client.get_dashboard().await.unwrap();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.total, 2);

    let first = &snapshot.items[0];
    assert_eq!(first.id, "1");
    assert_eq!(first.file_name, "minutes.mp3");
    assert_eq!(first.status, "P");
    assert_eq!(first.task_id.as_deref(), Some("celery-1"));

    assert!(snapshot.items[1].task_id.is_none());
}

#[tokio::test]
async fn test_get_dashboard_sends_bearer_token() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/main/dashboard/"))
        .and(header("authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [], "total": 0,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client.get_dashboard().await.unwrap();
    assert!(snapshot.items.is_empty());
}

#[tokio::test]
async fn test_get_dashboard_error_status_is_err() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/main/dashboard/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(client.get_dashboard().await.is_err());
}

#[tokio::test]
async fn test_get_dashboard_malformed_body_is_err() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/main/dashboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(client.get_dashboard().await.is_err());
}

#[tokio::test]
async fn test_get_dashboard_counts() {
    let (server, client) = setup_api_mock().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/main/dashboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [],
            "counts": {"AP": 2, "P": 1, "PD": 0, "SU": 1, "A": 5, "E": 0, "R": 1},
            "total": 10,
        })))
        .mount(&server)
        .await;

    let snapshot = client.get_dashboard().await.unwrap();
    assert_eq!(snapshot.counts.pending, 2);
    assert_eq!(snapshot.counts.unavailable, 1);
    assert_eq!(snapshot.counts.approved, 5);
    assert_eq!(snapshot.total, 10);
}
