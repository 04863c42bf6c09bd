//! Integration tests for folder create, delete and list.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;
use mediahub_storage::providers::{MemoryCmsMirror, MemoryObjectStore, MemoryRecordStore};

fn with_objects(objects: MemoryObjectStore) -> TestApp {
    TestApp::with_stores(MemoryRecordStore::new(), objects, MemoryCmsMirror::new())
}

#[tokio::test]
async fn test_create_sanitizes_name() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/folder-create",
            Some(json!({"name": "My Folder!!", "parent_path": "/"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], json!(true));
    let folder = &response.body["folder"];
    assert_eq!(folder["name"], json!("My_Folder"));
    assert_eq!(folder["path"], json!("My_Folder"));
    assert_eq!(folder["id"], folder["created_at"]);
    assert!(app.objects.has_folder("My_Folder").await);
}

#[tokio::test]
async fn test_create_nested() {
    let app = with_objects(MemoryObjectStore::new().with_folder("Shows"));

    let response = app
        .request(
            "POST",
            "/api/folder-create",
            Some(json!({"name": "Morning  Drive", "parent_path": "/Shows/"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["folder"]["path"], json!("Shows/Morning_Drive"));
}

#[tokio::test]
async fn test_create_is_idempotent_on_existing_folder() {
    let app = with_objects(MemoryObjectStore::new().with_folder("Promos"));

    let response = app
        .request("POST", "/api/folder-create", Some(json!({"name": "Promos"})))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_requires_usable_name() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/folder-create", Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("Folder name is required"));

    let response = app
        .request("POST", "/api/folder-create", Some(json!({"name": "!!!"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.objects.calls().create_folder, 0);
}

#[tokio::test]
async fn test_create_upstream_failure() {
    let app = with_objects(MemoryObjectStore::new().failing_creates());

    let response = app
        .request("POST", "/api/folder-create", Some(json!({"name": "Promos"})))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], json!("Failed to create folder"));
    assert!(response.body["details"].is_string());
}

#[tokio::test]
async fn test_delete_non_empty_folder_is_refused() {
    let app = with_objects(MemoryObjectStore::new().with_resources("Promos", 4));

    let response = app
        .request("DELETE", "/api/folder-delete?path=Promos", None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["file_count"], json!(4));
    assert_eq!(app.objects.calls().delete_folder, 0);
    assert!(app.objects.has_folder("Promos").await);
}

#[tokio::test]
async fn test_delete_empty_folder_by_body() {
    let app = with_objects(MemoryObjectStore::new().with_folder("Old"));

    let response = app
        .request("DELETE", "/api/folder-delete", Some(json!({"path": "Old"})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(response.body["path"], json!("Old"));
    assert!(!app.objects.has_folder("Old").await);
}

#[tokio::test]
async fn test_delete_requires_path() {
    let app = TestApp::new();

    let response = app.request("DELETE", "/api/folder-delete", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("Folder path is required"));
    assert_eq!(app.objects.calls().count_resources, 0);
}

#[tokio::test]
async fn test_list_from_object_store() {
    let app = with_objects(
        MemoryObjectStore::new()
            .with_folder("Shows/Morning")
            .with_folder("Promos"),
    );

    let response = app
        .request("GET", "/api/folder-list?source=cloudinary", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!([
            {"name": "Promos", "path": "Promos"},
            {"name": "Shows", "path": "Shows"}
        ])
    );

    let response = app
        .request("GET", "/api/folder-list?source=cloudinary&parent=Shows", None)
        .await;
    assert_eq!(response.body, json!([{"name": "Morning", "path": "Shows/Morning"}]));
}

#[tokio::test]
async fn test_list_from_record_store() {
    let rows = vec![json!({"id": 1, "name": "Promos", "path": "Promos"})];
    let app = TestApp::with_records(MemoryRecordStore::new().with_folders(rows.clone()));

    let response = app.request("GET", "/api/folder-list", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!(rows));
}

#[tokio::test]
async fn test_list_without_folders_table_is_empty() {
    let app = TestApp::with_records(MemoryRecordStore::new().without_folders_table());

    let response = app
        .request("GET", "/api/folder-list?source=database", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_folder_routes_reject_wrong_method() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/folder-create", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let response = app.request("POST", "/api/folder-delete", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
