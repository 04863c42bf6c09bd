//! Batch operations against the record store.
//!
//! Delete and update are all-or-nothing from the caller's point of view:
//! the first failing item aborts the batch and the request fails, though
//! items that already completed stay applied. Move isolates every item and
//! always reports per-item outcomes.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::traits::RecordStore;
use mediahub_core::types::RecordId;
use mediahub_entity::batch::{BatchItemResult, BatchMoveOutcome, BatchUpdate, DeleteOutcome};

use super::validate::{BatchMoveRequest, MoveTarget, validate_move};

/// Body of a batch delete.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchDeleteRequest {
    #[serde(default)]
    pub ids: Option<Value>,
}

/// Body of a batch update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchUpdateRequest {
    #[serde(default)]
    pub updates: Option<Value>,
}

/// Runs batch operations over the record store.
#[derive(Debug, Clone)]
pub struct BatchService {
    records: Arc<dyn RecordStore>,
}

impl BatchService {
    /// Creates a new batch service.
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// Delete every id concurrently. Results follow the input order.
    #[instrument(skip(self, request))]
    pub async fn delete_many(&self, request: BatchDeleteRequest) -> AppResult<Vec<DeleteOutcome>> {
        self.records.ensure_configured()?;

        let ids = match request.ids {
            Some(Value::Array(ids)) => ids,
            _ => return Err(AppError::validation("IDs array is required")),
        };
        let ids = ids
            .iter()
            .map(|v| {
                RecordId::from_json(v)
                    .ok_or_else(|| AppError::validation(format!("Invalid record ID: {v}")))
            })
            .collect::<AppResult<Vec<_>>>()?;

        info!(count = ids.len(), "Batch deleting records");

        let records = &self.records;
        try_join_all(ids.into_iter().map(|id| async move {
            records.delete_record(&id).await.map_err(|e| {
                warn!(id = %id, error = %e, "Record delete failed");
                AppError::upstream(format!("Failed to delete record {id}"))
            })?;
            Ok::<_, AppError>(DeleteOutcome { id, success: true })
        }))
        .await
        .map_err(|e| e.context("Failed to batch delete records"))
    }

    /// Apply every partial update concurrently and return the stored rows in
    /// input order. Field sets are forwarded verbatim.
    #[instrument(skip(self, request))]
    pub async fn update_many(&self, request: BatchUpdateRequest) -> AppResult<Vec<Value>> {
        self.records.ensure_configured()?;

        let updates = match request.updates {
            Some(Value::Array(updates)) => updates,
            _ => return Err(AppError::validation("Updates array is required")),
        };
        let updates = updates
            .into_iter()
            .map(|u| {
                serde_json::from_value::<BatchUpdate>(u).map_err(|_| {
                    AppError::validation("Each update requires an id and a fields object")
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        info!(count = updates.len(), "Batch updating records");

        let records = &self.records;
        try_join_all(updates.into_iter().map(|update| async move {
            records
                .update_record(&update.id, &update.fields)
                .await
                .map_err(|e| {
                    warn!(id = %update.id, error = %e, "Record update failed");
                    AppError::upstream(format!("Failed to update record {}", update.id))
                })
        }))
        .await
        .map_err(|e| e.context("Failed to batch update records"))
    }

    /// Move files into a folder (or the root). Validation failures reject
    /// the whole request before any update is issued; after that every
    /// file is attempted and the outcome is always reported in the body.
    #[instrument(skip(self, request))]
    pub async fn move_to_folder(
        &self,
        request: Option<BatchMoveRequest>,
    ) -> AppResult<BatchMoveOutcome> {
        self.records.ensure_configured()?;
        let MoveTarget {
            file_ids,
            folder_id,
        } = validate_move(request)?;

        let folder_path = match &folder_id {
            None => String::new(),
            Some(id) => self.resolve_folder_path(id).await?,
        };

        let mut fields = Map::new();
        fields.insert(
            "folder_id".to_string(),
            folder_id.as_ref().map(RecordId::to_json).unwrap_or(Value::Null),
        );
        fields.insert("folder_path".to_string(), json!(folder_path));

        info!(
            count = file_ids.len(),
            folder = %folder_path,
            "Moving files to folder"
        );

        let records = &self.records;
        let fields = &fields;
        let results = join_all(file_ids.into_iter().map(|id| async move {
            match records.update_record(&id, fields).await {
                Ok(_) => BatchItemResult::ok(id),
                Err(e) => {
                    warn!(id = %id, error = %e, "File move failed");
                    BatchItemResult::failed(id, e.message)
                }
            }
        }))
        .await;

        let outcome = BatchMoveOutcome::from_results(results);
        info!(
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            "Batch move finished"
        );
        Ok(outcome)
    }

    /// Path of a folder known to the record store, `Invalid folder ID`
    /// otherwise.
    async fn resolve_folder_path(&self, folder_id: &RecordId) -> AppResult<String> {
        let folders = self
            .records
            .list_folders()
            .await
            .map_err(|e| e.context("Failed to validate folder"))?;

        let row = folders
            .iter()
            .find(|row| {
                row.get("id")
                    .and_then(RecordId::from_json)
                    .is_some_and(|id| id.same_as(folder_id))
            })
            .ok_or_else(|| AppError::validation("Invalid folder ID"))?;

        Ok(row
            .get("path")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}
