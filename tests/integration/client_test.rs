//! Client service layer against a live server over in-memory stores.

mod helpers;

use serde_json::{Map, Value, json};

use helpers::{TestApp, media_rows};
use mediahub_client::{ApiClient, CmsMirrorClient, FolderClient, LocalView, MediaClient};
use mediahub_core::error::ErrorKind;
use mediahub_core::types::{PageRequest, RecordId};
use mediahub_entity::batch::BatchUpdate;
use mediahub_storage::providers::{MemoryCmsMirror, MemoryObjectStore, MemoryRecordStore};

fn clients(base_url: &str) -> (MediaClient, FolderClient) {
    let api = ApiClient::with_client(base_url, reqwest::Client::new());
    (MediaClient::new(api.clone()), FolderClient::new(api))
}

fn ids(raw: &[i64]) -> Vec<RecordId> {
    raw.iter().copied().map(RecordId::Number).collect()
}

#[tokio::test]
async fn test_fetch_and_search_files() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(12)));
    let (media, _) = clients(&app.spawn().await);

    let files = media.fetch_all_files().await;
    assert_eq!(files.len(), 12);
    assert_eq!(files[0].file_type, "video/mp4");
    assert!(files[0].thumbnail.contains("w_150,h_150,c_fill"));

    let page = media.search_files("spot 1", PageRequest::new(1, 2)).await;
    assert_eq!(page.total, 4);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "Spot 1");
}

#[tokio::test]
async fn test_fetch_is_fail_soft() {
    let app = TestApp::with_records(MemoryRecordStore::new().failing_listing());
    let (media, folders) = clients(&app.spawn().await);

    assert!(media.fetch_all_files().await.is_empty());
    let err = media.try_fetch_all_files().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Upstream);
    assert_eq!(err.message, "Failed to fetch media records");

    assert!(folders.fetch_all_folders().await.is_empty());
}

#[tokio::test]
async fn test_batch_move_then_local_view() {
    let records = MemoryRecordStore::new()
        .with_records(media_rows(3))
        .with_folders(vec![json!({"id": 7, "name": "Shows", "path": "Shows"})])
        .failing_on(2);
    let app = TestApp::with_records(records);
    let (media, folders) = clients(&app.spawn().await);

    let mut view = LocalView::default();
    view.refresh(&media, &folders).await;
    assert_eq!(view.files.len(), 3);
    assert_eq!(view.folders.len(), 1);

    let outcome = media
        .batch_move_files(&ids(&[1, 2, 3]), Some(&RecordId::Number(7)))
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 1);

    assert_eq!(view.apply_move(&outcome, "Shows"), 2);
    assert_eq!(view.files_in("Shows").len(), 2);
    assert_eq!(view.files_in("").len(), 1);
}

#[tokio::test]
async fn test_validate_bulk_before_batch() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(3)));
    let (media, _) = clients(&app.spawn().await);

    let checked = media.validate_bulk(&ids(&[3, 42, 1])).await;
    assert_eq!(checked.valid, ids(&[3, 1]));
    assert_eq!(checked.invalid, ids(&[42]));
    assert_eq!(checked.errors, vec!["File 42 not found".to_string()]);

    let broken = TestApp::with_records(MemoryRecordStore::new().failing_listing());
    let (media, _) = clients(&broken.spawn().await);
    let checked = media.validate_bulk(&ids(&[1])).await;
    assert!(checked.valid.is_empty() && checked.invalid.is_empty());
    assert!(checked.errors[0].starts_with("Validation failed:"));
}

#[tokio::test]
async fn test_batch_move_over_limit_is_rejected() {
    let app = TestApp::new();
    let (media, _) = clients(&app.spawn().await);

    let too_many: Vec<i64> = (1..=51).collect();
    let err = media.batch_move_files(&ids(&too_many), None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(app.records.calls().update, 0);
}

#[tokio::test]
async fn test_batch_delete_and_update() {
    let app = TestApp::with_records(MemoryRecordStore::new().with_records(media_rows(3)));
    let (media, _) = clients(&app.spawn().await);

    let mut fields = Map::new();
    fields.insert("title".to_string(), json!("Renamed"));
    let updated = media
        .batch_update_files(&[BatchUpdate {
            id: RecordId::Number(1),
            fields,
        }])
        .await
        .unwrap();
    assert_eq!(updated[0]["title"], json!("Renamed"));

    let deleted = media.batch_delete_files(&ids(&[2, 3])).await.unwrap();
    assert!(deleted.iter().all(|d| d.success));
    assert_eq!(app.records.snapshot().await.len(), 1);

    let err = media.batch_delete_files(&ids(&[9])).await.unwrap_err();
    assert_eq!(err.details.as_deref(), Some("Failed to delete record 9"));
}

#[tokio::test]
async fn test_single_record_round_trip() {
    let app = TestApp::new();
    let (media, _) = clients(&app.spawn().await);

    let record = media
        .save_file(&json!({
            "title": "Station ID",
            "url": "https://res.cloudinary.com/demo/video/upload/v1/id.mp4",
            "size": 100
        }))
        .await
        .unwrap();
    let id = RecordId::from_json(&record["id"]).unwrap();

    let mut view = LocalView::new(media.fetch_all_files().await, Vec::new());
    assert_eq!(view.files.len(), 1);

    let mut fields = Map::new();
    fields.insert("title".to_string(), json!("Legal ID"));
    let row = media.update_file(&id, &fields).await.unwrap();
    assert!(view.apply_record(&row));
    assert_eq!(view.files[0].title, "Legal ID");

    media.delete_file(&id).await.unwrap();
    assert!(media.fetch_all_files().await.is_empty());

    let mirrored = CmsMirrorClient::new(app.mirror.clone()).fetch_items().await.unwrap();
    assert_eq!(mirrored.len(), 1);
    assert_eq!(mirrored[0].title, "Station ID");
}

#[tokio::test]
async fn test_folder_lifecycle_and_rename() {
    let app = TestApp::with_stores(
        MemoryRecordStore::new().with_records(vec![
            json!({"id": 1, "media_url": "https://x/1.mp3", "folder_path": "Shows"}),
            json!({"id": 2, "media_url": "https://x/2.mp3", "folder_path": "Shows/Late"}),
            json!({"id": 3, "media_url": "https://x/3.mp3", "folder_path": "Showcase"}),
        ]),
        MemoryObjectStore::new(),
        MemoryCmsMirror::new(),
    );
    let (media, folders) = clients(&app.spawn().await);

    let created = folders.create_folder("Morning Show!", Some("Shows")).await.unwrap();
    assert_eq!(created.path, "Shows/Morning_Show");
    assert_eq!(created.parent_path, "Shows");

    let mut view = LocalView::default();
    view.add_folder(created.clone());
    folders.delete_folder(&created.path).await.unwrap();
    assert_eq!(view.remove_folder(&created.path), 1);

    let err = folders.create_folder("!!!", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let files = media.fetch_all_files().await;
    let renamed = folders
        .rename_folder(&media, &files, "Shows", "Programs")
        .await
        .unwrap();
    assert_eq!(renamed, 2);

    let paths: Vec<Value> = app
        .records
        .snapshot()
        .await
        .iter()
        .map(|r| r["folder_path"].clone())
        .collect();
    assert_eq!(paths, vec![json!("Programs"), json!("Programs/Late"), json!("Showcase")]);
}

#[tokio::test]
async fn test_folder_delete_refused_when_not_empty() {
    let app = TestApp::with_stores(
        MemoryRecordStore::new(),
        MemoryObjectStore::new().with_resources("Ads", 2),
        MemoryCmsMirror::new(),
    );
    let (_, folders) = clients(&app.spawn().await);

    let err = folders.delete_folder("Ads").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.fields.get("file_count"), Some(&json!(2)));
}
