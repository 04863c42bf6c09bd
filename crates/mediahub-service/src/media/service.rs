//! Media record endpoints: thin passes over the record store.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::traits::RecordStore;
use mediahub_core::types::{PageResponse, RecordId};

use super::search::{MediaQuery, filter_records};
use super::upload::UploadMetadata;
use crate::sync::MirrorSyncService;

/// Result of the media list endpoint: the raw rows, or a page of matches
/// when any search or pagination parameter was given.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MediaListing {
    Raw(Vec<Value>),
    Page(PageResponse<Value>),
}

/// Health probe body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    /// Whether the record store credentials are present.
    pub env: bool,
}

/// Media record operations.
#[derive(Debug, Clone)]
pub struct MediaService {
    records: Arc<dyn RecordStore>,
    sync: MirrorSyncService,
}

impl MediaService {
    /// Creates a new media service.
    pub fn new(records: Arc<dyn RecordStore>, sync: MirrorSyncService) -> Self {
        Self { records, sync }
    }

    /// List records, optionally filtered and paginated.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &MediaQuery) -> AppResult<MediaListing> {
        if query.is_empty() {
            self.records.ensure_configured()?;
            let rows = self.fetch_all().await?;
            debug!(count = rows.len(), "Listed media records");
            return Ok(MediaListing::Raw(rows));
        }
        Ok(MediaListing::Page(self.search(query).await?))
    }

    /// Filter and paginate records.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &MediaQuery) -> AppResult<PageResponse<Value>> {
        self.records.ensure_configured()?;
        let rows = self.fetch_all().await?;
        let needle = query.needle();
        let hits = filter_records(rows, needle.as_deref());
        Ok(query.page_request().slice(hits))
    }

    /// Insert a record for an uploaded file, then mirror it. A mirror
    /// failure never fails the upload. `None` means the request had no body.
    #[instrument(skip(self, metadata))]
    pub async fn upload(&self, metadata: Option<UploadMetadata>) -> AppResult<Value> {
        let metadata = UploadMetadata::validate(metadata)?;
        self.records.ensure_configured()?;
        let record = self.records.create_record(&metadata.into_record()).await?;
        info!(id = ?record.get("id"), "Upload recorded");

        if self.sync.is_enabled() {
            if let Err(e) = self.sync.upsert(&record).await {
                warn!(error = %e, "Mirror sync after upload failed");
            }
        } else {
            debug!("Mirror not configured, skipping upload sync");
        }
        Ok(record)
    }

    /// Partially update one record and return the stored row.
    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: &str, fields: &Map<String, Value>) -> AppResult<Value> {
        self.records.ensure_configured()?;
        let id = parse_path_id(id)?;
        self.records
            .update_record(&id, fields)
            .await
            .map_err(|e| e.context("Failed to update record"))
    }

    /// Delete one record.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.records.ensure_configured()?;
        let id = parse_path_id(id)?;
        self.records
            .delete_record(&id)
            .await
            .map_err(|e| e.context("Failed to delete record"))
    }

    /// Liveness plus whether the record store is configured.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            ok: true,
            env: self.records.ensure_configured().is_ok(),
        }
    }

    async fn fetch_all(&self) -> AppResult<Vec<Value>> {
        self.records
            .list_records()
            .await
            .map_err(|e| e.context("Failed to fetch media records"))
    }
}

/// Record id from a URL path segment. Numeric segments keep their numeric
/// form.
fn parse_path_id(raw: &str) -> AppResult<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation("Record ID is required"));
    }
    Ok(raw
        .parse::<i64>()
        .map(RecordId::Number)
        .unwrap_or_else(|_| RecordId::Text(raw.to_string())))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use mediahub_core::error::ErrorKind;
    use mediahub_storage::providers::{MemoryCmsMirror, MemoryRecordStore};

    fn service(records: MemoryRecordStore, mirror: MemoryCmsMirror) -> (MediaService, Arc<MemoryRecordStore>, Arc<MemoryCmsMirror>) {
        let records = Arc::new(records);
        let mirror = Arc::new(mirror);
        let sync = MirrorSyncService::new(records.clone(), mirror.clone());
        (MediaService::new(records.clone(), sync), records, mirror)
    }

    fn rows(n: i64) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({"id": i, "title": if i % 2 == 0 { "Promo spot" } else { "Show" }}))
            .collect()
    }

    #[tokio::test]
    async fn test_list_without_params_is_raw() {
        let (svc, _, _) = service(MemoryRecordStore::new().with_records(rows(3)), MemoryCmsMirror::new());
        match svc.list(&MediaQuery::default()).await.unwrap() {
            MediaListing::Raw(rows) => assert_eq!(rows.len(), 3),
            MediaListing::Page(_) => panic!("expected raw listing"),
        }
    }

    #[tokio::test]
    async fn test_search_paginates_matches() {
        let (svc, _, _) = service(MemoryRecordStore::new().with_records(rows(10)), MemoryCmsMirror::new());
        let query = MediaQuery {
            q: Some("PROMO".into()),
            page: Some(2),
            page_size: Some(2),
        };
        let page = svc.search(&query).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);
        let ids: Vec<_> = page.items.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(6), json!(8)]);
    }

    #[tokio::test]
    async fn test_upload_then_list_round_trip() {
        let (svc, _, mirror) = service(MemoryRecordStore::new(), MemoryCmsMirror::new());
        let meta: UploadMetadata = serde_json::from_value(json!({
            "title": "Station ID",
            "url": "https://res.cloudinary.com/demo/video/upload/v1/id.mp4",
            "size": 100
        }))
        .unwrap();
        let record = svc.upload(Some(meta)).await.unwrap();

        let MediaListing::Raw(rows) = svc.list(&MediaQuery::default()).await.unwrap() else {
            panic!("expected raw listing");
        };
        assert_eq!(rows, vec![record.clone()]);
        assert_eq!(rows[0]["media_url"], json!("https://res.cloudinary.com/demo/video/upload/v1/id.mp4"));
        assert_eq!(mirror.items().await.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_survives_mirror_failure() {
        let (svc, records, _) = service(MemoryRecordStore::new(), MemoryCmsMirror::new().failing_writes());
        let meta = UploadMetadata {
            url: Some(json!("https://x/a.mp3")),
            ..Default::default()
        };
        svc.upload(Some(meta)).await.unwrap();
        assert_eq!(records.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_without_url_writes_nothing() {
        let (svc, records, mirror) = service(MemoryRecordStore::new(), MemoryCmsMirror::new());
        let err = svc.upload(Some(UploadMetadata::default())).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(records.calls().create, 0);
        assert_eq!(mirror.calls().create, 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_errors_carry_details() {
        let (svc, _, _) = service(MemoryRecordStore::new(), MemoryCmsMirror::new());
        let err = svc.delete("9").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Upstream);
        assert_eq!(err.message, "Failed to delete record");
        assert!(err.details.unwrap().contains("404"));

        let err = svc.update(" ", &Map::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_unconfigured_store() {
        let (svc, records, _) = service(MemoryRecordStore::unconfigured(), MemoryCmsMirror::new());
        assert!(!svc.health().env);
        let err = svc.list(&MediaQuery::default()).await.unwrap_err();
        assert_eq!(err.message, "XANO_API_KEY environment variable not configured");
        assert_eq!(records.calls().list, 0);
    }
}
