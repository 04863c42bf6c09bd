//! Integration tests for batch delete, update and move.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, media_rows};
use mediahub_storage::providers::MemoryRecordStore;

#[tokio::test]
async fn test_batch_delete_all_succeed() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(3)));

    let response = app
        .request("POST", "/api/batch-delete", Some(json!({"ids": ["1", "2", 3]})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    let results = response.body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r["success"] == json!(true)));
    assert_eq!(results[0]["id"], json!("1"));
    assert_eq!(results[2]["id"], json!(3));
    assert!(app.records.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_batch_delete_one_missing_fails_whole_request() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(1)));

    let response = app
        .request("POST", "/api/batch-delete", Some(json!({"ids": ["1", "2"]})))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], json!("Failed to batch delete records"));
    assert!(
        response.body["details"]
            .as_str()
            .unwrap()
            .contains("Failed to delete record 2")
    );
    assert!(response.body.get("results").is_none());
}

#[tokio::test]
async fn test_batch_delete_requires_ids() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/batch-delete", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("IDs array is required"));

    let response = app
        .request("POST", "/api/batch-delete", Some(json!({"ids": "1,2"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.records.calls().delete, 0);
}

#[tokio::test]
async fn test_unconfigured_record_store() {
    let app = TestApp::with_records(MemoryRecordStore::unconfigured());

    let response = app
        .request("POST", "/api/batch-delete", Some(json!({"ids": ["1"]})))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body["error"],
        json!("XANO_API_KEY environment variable not configured")
    );
    assert_eq!(app.records.calls().delete, 0);
}

#[tokio::test]
async fn test_batch_update_returns_records() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(2)));

    let response = app
        .request(
            "POST",
            "/api/batch-update",
            Some(json!({"updates": [
                {"id": 1, "fields": {"category": "Promos"}},
                {"id": 2, "fields": {"title": "Renamed"}}
            ]})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let results = response.body["results"].as_array().unwrap();
    assert_eq!(results[0]["category"], json!("Promos"));
    assert_eq!(results[1]["title"], json!("Renamed"));
}

#[tokio::test]
async fn test_batch_update_failure_is_500() {
    let app = TestApp::with_records(
        MemoryRecordStore::new()
            .with_records(media_rows(2))
            .failing_on(2_i64),
    );

    let response = app
        .request(
            "POST",
            "/api/batch-update",
            Some(json!({"updates": [
                {"id": 1, "fields": {"category": "Promos"}},
                {"id": 2, "fields": {"category": "Promos"}}
            ]})),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], json!("Failed to batch update records"));
    assert_eq!(response.body["details"], json!("Failed to update record 2"));
}

#[tokio::test]
async fn test_batch_move_over_limit_makes_no_calls() {
    let app = TestApp::new();
    let ids: Vec<i64> = (1..=51).collect();

    let response = app
        .request(
            "POST",
            "/.netlify/functions/batch-move-to-folder",
            Some(json!({"fileIds": ids, "folderId": null})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("Cannot move more than 50 files at once"));
    let calls = app.records.calls();
    assert_eq!(calls.update, 0);
    assert_eq!(calls.list_folders, 0);
}

#[tokio::test]
async fn test_batch_move_unknown_folder() {
    let app = TestApp::with_records(
        MemoryRecordStore::new()
            .with_records(media_rows(2))
            .with_folders(vec![json!({"id": 7, "name": "Promos", "path": "Promos"})]),
    );

    let response = app
        .request(
            "POST",
            "/api/batch-move-to-folder",
            Some(json!({"fileIds": [1, 2], "folderId": 99})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("Invalid folder ID"));
    assert_eq!(app.records.calls().update, 0);
}

#[tokio::test]
async fn test_batch_move_to_root_reports_partial_failure() {
    let app = TestApp::with_records(
        MemoryRecordStore::new()
            .with_records(media_rows(3))
            .failing_on(2_i64),
    );

    let response = app
        .request(
            "POST",
            "/.netlify/functions/batch-move-to-folder",
            Some(json!({"fileIds": [1, 2, 3], "folderId": null})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["succeeded"], json!(2));
    assert_eq!(body["failed"], json!(1));
    assert_eq!(body["results"][1]["fileId"], json!(2));
    assert_eq!(body["results"][1]["success"], json!(false));
    assert!(body["results"][1]["error"].is_string());
    assert_eq!(app.records.calls().update, 3);
    assert_eq!(app.records.calls().list_folders, 0);
}

#[tokio::test]
async fn test_batch_move_into_folder_sets_path() {
    let app = TestApp::with_records(
        MemoryRecordStore::new()
            .with_records(media_rows(2))
            .with_folders(vec![json!({"id": 7, "name": "Promos", "path": "Shows/Promos"})]),
    );

    let response = app
        .request(
            "POST",
            "/.netlify/functions/batch-move-to-folder",
            Some(json!({"fileIds": [1, 2], "folderId": 7})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    let rows = app.records.snapshot().await;
    assert!(rows.iter().all(|r| r["folder_path"] == json!("Shows/Promos")));
    assert!(rows.iter().all(|r| r["folder_id"] == json!(7)));
}

#[tokio::test]
async fn test_batch_move_validation_messages() {
    let app = TestApp::new();
    let path = "/.netlify/functions/batch-move-to-folder";

    let cases = [
        (None, "Request body is required"),
        (Some(json!({"fileIds": 5})), "fileIds must be an array"),
        (Some(json!({"fileIds": []})), "fileIds array cannot be empty"),
        (Some(json!({"fileIds": [1, -2]})), "All fileIds must be positive numbers"),
        (
            Some(json!({"fileIds": [1], "folderId": "x"})),
            "folderId must be null or a positive number",
        ),
    ];
    for (body, message) in cases {
        let response = app.request("POST", path, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{message}");
        assert_eq!(response.body["error"], json!(message));
    }
}

#[tokio::test]
async fn test_batch_move_rejects_get() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/.netlify/functions/batch-move-to-folder", None)
        .await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["error"], json!("Method not allowed"));
}
