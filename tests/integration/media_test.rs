//! Integration tests for media listing, search, upload, update and delete.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, media_rows};
use mediahub_storage::providers::{MemoryCmsMirror, MemoryObjectStore, MemoryRecordStore};

#[tokio::test]
async fn test_upload_then_list_contains_record() {
    let app = TestApp::new();
    let url = "https://res.cloudinary.com/demo/video/upload/v17/station-id.mp4";

    let response = app
        .request(
            "POST",
            "/api/upload",
            Some(json!({
                "title": "Station ID",
                "type": "video/mp4",
                "url": url,
                "size": 52_000,
                "tags": ["id", "legal"]
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    let record = response.body["record"].clone();
    assert_eq!(record["media_url"], json!(url));

    let listing = app.request("GET", "/api/media", None).await;
    assert_eq!(listing.status, StatusCode::OK);
    let rows = listing.body.as_array().unwrap();
    assert!(rows.iter().any(|r| r["media_url"] == json!(url)));
    assert_eq!(app.mirror.items().await.len(), 1);
}

#[tokio::test]
async fn test_upload_succeeds_when_mirror_fails() {
    let app = TestApp::with_stores(
        MemoryRecordStore::new(),
        MemoryObjectStore::new(),
        MemoryCmsMirror::new().failing_writes(),
    );

    let response = app
        .request("POST", "/api/upload", Some(json!({"title": "Promo", "url": "https://x/p.mp3"})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.records.snapshot().await.len(), 1);
}

#[tokio::test]
async fn test_upload_without_body_or_url_is_rejected() {
    let app = TestApp::new();

    let response = app.request_raw("POST", "/api/upload", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Request body is required");

    let response = app
        .request("POST", "/api/upload", Some(json!({"title": "No file", "url": " "})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Media URL is required");

    assert!(app.records.snapshot().await.is_empty());
    assert!(app.mirror.items().await.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_get() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/upload", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_media_search_paginates() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(12)));

    let response = app
        .request("GET", "/api/media?q=spot%201&page=1&pageSize=2", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    // "Spot 1", "Spot 10", "Spot 11", "Spot 12"
    assert_eq!(response.body["total"], json!(4));
    assert_eq!(response.body["page"], json!(1));
    assert_eq!(response.body["pageSize"], json!(2));
    assert_eq!(response.body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_always_pages() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(3)));

    let response = app.request("GET", "/api/search", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], json!(3));
    assert_eq!(response.body["pageSize"], json!(100));
}

#[tokio::test]
async fn test_bad_page_is_400() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/search?page=abc", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_failure_is_500() {
    let app = TestApp::with_records(MemoryRecordStore::new().failing_listing());

    let response = app.request("GET", "/api/media", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], json!("Failed to fetch media records"));
}

#[tokio::test]
async fn test_update_and_delete_single_record() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(2)));

    let response = app
        .request("PATCH", "/api/update/1", Some(json!({"title": "Renamed"})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], json!(1));
    assert_eq!(response.body["title"], json!("Renamed"));

    let response = app.request("DELETE", "/api/delete/2", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"success": true}));
    assert_eq!(app.records.snapshot().await.len(), 1);

    let response = app.request("DELETE", "/api/delete/2", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], json!("Failed to delete record"));
}

#[tokio::test]
async fn test_health_reports_configuration() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.body, json!({"ok": true, "env": true}));

    let app = TestApp::with_records(MemoryRecordStore::unconfigured());
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"ok": true, "env": false}));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = TestApp::new();

    let response = app.request_raw("POST", "/api/batch-update", "{updates:").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON body")
    );
}
