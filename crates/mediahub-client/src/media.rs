//! Media record wrapper over the batch and media endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, instrument, warn};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::types::{PageRequest, PageResponse, RecordId};
use mediahub_entity::batch::{BatchMoveOutcome, BatchUpdate, DeleteOutcome};
use mediahub_entity::file::FileRecord;
use mediahub_entity::file::normalize::process_records;

use crate::api::ApiClient;

/// Pre-flight check of the ids a UI is about to send in a batch call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkValidation {
    /// Requested ids that exist, in request order.
    pub valid: Vec<RecordId>,
    /// Requested ids with no matching record.
    pub invalid: Vec<RecordId>,
    /// One message per invalid id, or the fetch failure.
    pub errors: Vec<String>,
}

impl BulkValidation {
    /// Split `ids` against the known files.
    pub fn split(ids: &[RecordId], files: &[FileRecord]) -> Self {
        let mut result = Self::default();
        for id in ids {
            if files.iter().any(|f| f.id.same_as(id)) {
                result.valid.push(id.clone());
            } else {
                result.errors.push(format!("File {id} not found"));
                result.invalid.push(id.clone());
            }
        }
        result
    }

    /// Whether every requested id exists.
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty() && self.errors.is_empty()
    }
}

/// Media and batch operations, returning canonical records.
#[derive(Debug, Clone)]
pub struct MediaClient {
    api: ApiClient,
}

impl MediaClient {
    /// Wrap an API connection.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every file record. Any failure yields an empty list.
    pub async fn fetch_all_files(&self) -> Vec<FileRecord> {
        match self.try_fetch_all_files().await {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "Fetching files failed, returning empty list");
                Vec::new()
            }
        }
    }

    /// Every file record, propagating failures.
    #[instrument(skip(self))]
    pub async fn try_fetch_all_files(&self) -> AppResult<Vec<FileRecord>> {
        let url = self.api.url(&["media"])?;
        let body = self.api.send(self.api.http().get(url)).await?;
        let files = process_records(&rows_of(&body));
        debug!(count = files.len(), "Fetched files");
        Ok(files)
    }

    /// Check which of `ids` exist before a batch call. A failed fetch is
    /// reported in `errors` with no id classified.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn validate_bulk(&self, ids: &[RecordId]) -> BulkValidation {
        match self.try_fetch_all_files().await {
            Ok(files) => BulkValidation::split(ids, &files),
            Err(e) => {
                warn!(error = %e, "Bulk validation could not fetch files");
                BulkValidation {
                    errors: vec![format!("Validation failed: {e}")],
                    ..Default::default()
                }
            }
        }
    }

    /// One page of matches for `query`. Failures yield an empty page.
    #[instrument(skip(self))]
    pub async fn search_files(&self, query: &str, page: PageRequest) -> PageResponse<FileRecord> {
        match self.try_search_files(query, page).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Search failed, returning empty page");
                PageResponse {
                    items: Vec::new(),
                    total: 0,
                    page: page.page,
                    page_size: page.page_size,
                }
            }
        }
    }

    async fn try_search_files(
        &self,
        query: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<FileRecord>> {
        let mut url = self.api.url(&["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.page.to_string())
            .append_pair("pageSize", &page.page_size.to_string());
        let body = self.api.send(self.api.http().get(url)).await?;
        let raw: PageResponse<Value> = serde_json::from_value(body)?;
        Ok(PageResponse {
            items: process_records(&raw.items),
            total: raw.total,
            page: raw.page,
            page_size: raw.page_size,
        })
    }

    /// Record a file already stored in the object store. Returns the stored
    /// row as the record store answered it.
    #[instrument(skip(self, metadata))]
    pub async fn save_file<T: Serialize>(&self, metadata: &T) -> AppResult<Value> {
        let url = self.api.url(&["upload"])?;
        let body = self.api.send(self.api.http().post(url).json(metadata)).await?;
        body.get("record")
            .cloned()
            .ok_or_else(|| AppError::upstream("Upload response carried no record"))
    }

    /// Patch one record.
    #[instrument(skip(self, fields))]
    pub async fn update_file(&self, id: &RecordId, fields: &Map<String, Value>) -> AppResult<Value> {
        let url = self.api.url(&["update", &id.to_string()])?;
        self.api.send(self.api.http().patch(url).json(fields)).await
    }

    /// Delete one record.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, id: &RecordId) -> AppResult<()> {
        let url = self.api.url(&["delete", &id.to_string()])?;
        self.api.send(self.api.http().delete(url)).await?;
        Ok(())
    }

    /// Patch many records; all or nothing.
    #[instrument(skip(self, updates), fields(count = updates.len()))]
    pub async fn batch_update_files(&self, updates: &[BatchUpdate]) -> AppResult<Vec<Value>> {
        let url = self.api.url(&["batch-update"])?;
        let body = self
            .api
            .send(self.api.http().post(url).json(&json!({ "updates": updates })))
            .await?;
        Ok(results_of(body))
    }

    /// Delete many records; all or nothing.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn batch_delete_files(&self, ids: &[RecordId]) -> AppResult<Vec<DeleteOutcome>> {
        let url = self.api.url(&["batch-delete"])?;
        let body = self
            .api
            .send(self.api.http().post(url).json(&json!({ "ids": ids })))
            .await?;
        Ok(serde_json::from_value(Value::Array(results_of(body)))?)
    }

    /// Move files into a folder (or the root with `None`). Partial failure
    /// is reported in the outcome, not as an error.
    #[instrument(skip(self, file_ids), fields(count = file_ids.len()))]
    pub async fn batch_move_files(
        &self,
        file_ids: &[RecordId],
        folder_id: Option<&RecordId>,
    ) -> AppResult<BatchMoveOutcome> {
        let url = self.api.url(&["batch-move-to-folder"])?;
        let body = self
            .api
            .send(
                self.api
                    .http()
                    .post(url)
                    .json(&json!({ "fileIds": file_ids, "folderId": folder_id })),
            )
            .await?;
        Ok(serde_json::from_value(body)?)
    }
}

/// Rows of a list response: a bare array or `{records: [...]}`.
fn rows_of(body: &Value) -> Vec<Value> {
    match body {
        Value::Array(rows) => rows.clone(),
        Value::Object(map) => map
            .get("records")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn results_of(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(results)) => results,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
