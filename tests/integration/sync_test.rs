//! Integration tests for the CMS mirror sync endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, media_rows};
use mediahub_storage::providers::{MemoryCmsMirror, MemoryObjectStore, MemoryRecordStore};

#[tokio::test]
async fn test_full_sync_then_resync() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(3)));

    let response = app.request("POST", "/api/webflow-sync", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let results = &response.body["results"];
    assert_eq!(results["successful"].as_array().unwrap().len(), 3);
    assert_eq!(results["failed"], json!([]));
    assert_eq!(results["published"], json!(true));

    let response = app.request("POST", "/api/webflow-sync", Some(json!({}))).await;
    let successful = response.body["results"]["successful"].as_array().unwrap();
    assert!(successful.iter().all(|r| r["existed"] == json!(true)));
    assert_eq!(app.mirror.items().await.len(), 3);
}

#[tokio::test]
async fn test_single_file_sync() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(2)));

    let response = app
        .request("POST", "/api/webflow-sync", Some(json!({"fileId": 2})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"]["fileId"], json!(2));
    assert_eq!(response.body["result"]["existed"], json!(false));
    let items = app.mirror.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["fieldData"]["name"], json!("Spot 2"));
}

#[tokio::test]
async fn test_single_file_missing() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/webflow-sync", Some(json!({"fileId": 42})))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], json!("File not found in record store"));
}

#[tokio::test]
async fn test_disabled_mirror() {
    let app = TestApp::with_stores(
        MemoryRecordStore::new(),
        MemoryObjectStore::new(),
        MemoryCmsMirror::unconfigured(),
    );

    let response = app.request("POST", "/api/webflow-sync", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], json!("Webflow configuration missing"));
}

#[tokio::test]
async fn test_get_runs_full_sync() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(2)));

    let response = app.request("GET", "/api/webflow-sync", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["results"]["successful"].as_array().unwrap().len(), 2);
    assert_eq!(app.mirror.items().await.len(), 2);

    let response = app.request("DELETE", "/api/webflow-sync", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
