//! Integration tests for the aircheck track endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{ADMIN_PASSWORD, TestApp};
use mediahub_storage::providers::MemoryRecordStore;

fn config_row() -> MemoryRecordStore {
    MemoryRecordStore::new().with_records(vec![json!({"id": 3541, "title": "Aircheck config"})])
}

#[tokio::test]
async fn test_get_serves_defaults_without_config() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/aircheck-tracks", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["source"], json!("defaults"));
    assert_eq!(response.body["tracks"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_write_requires_password() {
    let app = TestApp::with_records(config_row());
    let body = json!({"tracks": [{"label": "Live", "url": "https://x/live.mp3"}]});

    let response = app
        .request("POST", "/api/aircheck-tracks", Some(body.clone()))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["error"],
        json!("Unauthorized - Invalid admin password")
    );

    let response = app
        .request_with_headers(
            "PUT",
            "/api/aircheck-tracks",
            Some(body),
            &[("X-Admin-Password", "wrong")],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.records.calls().update, 0);
}

#[tokio::test]
async fn test_save_then_read_back() {
    let app = TestApp::with_records(config_row());
    let tracks = json!([{"label": "Live", "url": "https://x/live.mp3"}]);

    let response = app
        .request_with_headers(
            "POST",
            "/api/aircheck-tracks",
            Some(json!({"tracks": tracks})),
            &[("X-Admin-Password", ADMIN_PASSWORD)],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(response.body["message"], json!("Tracks saved successfully"));
    assert_eq!(response.body["tracks"], tracks);

    let response = app.request("GET", "/api/aircheck-tracks", None).await;
    assert_eq!(response.body["source"], json!("database"));
    assert_eq!(response.body["tracks"], tracks);
}

#[tokio::test]
async fn test_save_rejects_non_array() {
    let app = TestApp::with_records(config_row());

    let response = app
        .request_with_headers(
            "POST",
            "/api/aircheck-tracks",
            Some(json!({"tracks": "all of them"})),
            &[("X-Admin-Password", ADMIN_PASSWORD)],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        json!("Invalid tracks data - must be an array")
    );
}

#[tokio::test]
async fn test_delete_is_not_allowed() {
    let app = TestApp::new();
    let response = app.request("DELETE", "/api/aircheck-tracks", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
