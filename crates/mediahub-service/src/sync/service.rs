//! Keeps the CMS mirror loosely in step with the record store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::traits::{CmsMirror, RecordStore};
use mediahub_core::types::RecordId;

use super::fields::build_field_data;

/// Body of a sync request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// `delete` removes a file; anything else upserts.
    #[serde(default)]
    pub action: Option<String>,
    /// Limit the run to one file.
    #[serde(default)]
    pub file_id: Option<Value>,
}

/// Result of upserting one record into the mirror.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResult {
    pub file_id: RecordId,
    pub collection_item_id: String,
    /// Whether the item was already mirrored (nothing was written).
    pub existed: bool,
}

/// Where a delete took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    #[serde(rename = "removedFromXano")]
    pub removed_from_record_store: bool,
    #[serde(rename = "removedFromWebflow")]
    pub removed_from_mirror: bool,
}

/// One record that could not be mirrored during a full sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncFailure {
    pub file_id: Value,
    pub error: String,
}

/// Outcome of a full sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FullSyncReport {
    pub successful: Vec<UpsertResult>,
    pub failed: Vec<SyncFailure>,
    /// Whether the site publish after the sync succeeded.
    pub published: bool,
}

/// What a sync request did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SyncOutcome {
    Deleted { success: bool, deleted: DeleteResult },
    Single { success: bool, result: UpsertResult },
    Full { success: bool, results: FullSyncReport },
}

/// Mirrors record-store rows into the CMS collection.
#[derive(Debug, Clone)]
pub struct MirrorSyncService {
    records: Arc<dyn RecordStore>,
    mirror: Arc<dyn CmsMirror>,
}

impl MirrorSyncService {
    /// Creates a new sync service.
    pub fn new(records: Arc<dyn RecordStore>, mirror: Arc<dyn CmsMirror>) -> Self {
        Self { records, mirror }
    }

    /// Whether the mirror is enabled and configured.
    pub fn is_enabled(&self) -> bool {
        self.mirror.ensure_configured().is_ok()
    }

    /// Dispatch a sync request: delete one file, sync one file, or sync
    /// everything.
    #[instrument(skip(self, request), fields(action = ?request.action))]
    pub async fn run(&self, request: SyncRequest) -> AppResult<SyncOutcome> {
        self.mirror.ensure_configured()?;
        self.records.ensure_configured()?;

        let file_id = request.file_id.as_ref().and_then(RecordId::from_json);
        match (request.action.as_deref(), file_id) {
            (Some("delete"), Some(id)) => Ok(SyncOutcome::Deleted {
                success: true,
                deleted: self.delete(&id).await,
            }),
            (_, Some(id)) => Ok(SyncOutcome::Single {
                success: true,
                result: self.sync_one(&id).await?,
            }),
            (_, None) => Ok(SyncOutcome::Full {
                success: true,
                results: self.sync_all().await?,
            }),
        }
    }

    /// Sync one record by id.
    pub async fn sync_one(&self, id: &RecordId) -> AppResult<UpsertResult> {
        let record = self
            .records
            .get_record(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found in record store"))?;
        self.upsert(&record).await
    }

    /// Upsert every record sequentially, then publish the site.
    pub async fn sync_all(&self) -> AppResult<FullSyncReport> {
        let records = self
            .records
            .list_records()
            .await
            .map_err(|e| e.context("Failed to fetch records"))?;
        info!(count = records.len(), "Starting full mirror sync");

        let mut report = FullSyncReport::default();
        for record in &records {
            match self.upsert(record).await {
                Ok(result) => report.successful.push(result),
                Err(e) => {
                    warn!(error = %e, "Mirror upsert failed");
                    report.failed.push(SyncFailure {
                        file_id: record.get("id").cloned().unwrap_or(Value::Null),
                        error: e.message,
                    });
                }
            }
        }

        report.published = match self.mirror.publish_site().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Site publish failed, sync results kept");
                false
            }
        };

        info!(
            successful = report.successful.len(),
            failed = report.failed.len(),
            published = report.published,
            "Full mirror sync finished"
        );
        Ok(report)
    }

    /// Create the mirror item for a record unless one already exists.
    pub async fn upsert(&self, record: &Value) -> AppResult<UpsertResult> {
        let file_id = record
            .get("id")
            .and_then(RecordId::from_json)
            .ok_or_else(|| AppError::validation("Record has no id"))?;

        if let Some(item_id) = self.mirror.find_item_by_file_id(&file_id).await? {
            debug!(file_id = %file_id, item_id = %item_id, "Mirror item already exists");
            return Ok(UpsertResult {
                file_id,
                collection_item_id: item_id,
                existed: true,
            });
        }

        let item_id = self.mirror.create_item(&build_field_data(record)).await?;
        if let Err(e) = self.mirror.publish_item(&item_id).await {
            warn!(item_id = %item_id, error = %e, "Item publish failed");
        }

        info!(file_id = %file_id, item_id = %item_id, "Mirror item created");
        Ok(UpsertResult {
            file_id,
            collection_item_id: item_id,
            existed: false,
        })
    }

    /// Remove a file from the record store and its mirror item. Each side
    /// is attempted independently.
    pub async fn delete(&self, id: &RecordId) -> DeleteResult {
        let removed_from_record_store = match self.records.delete_record(id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(id = %id, error = %e, "Record delete failed during sync");
                false
            }
        };

        let removed_from_mirror = match self.mirror.find_item_by_file_id(id).await {
            Ok(Some(item_id)) => match self.mirror.delete_item(&item_id).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(item_id = %item_id, error = %e, "Mirror item delete failed");
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                warn!(id = %id, error = %e, "Mirror lookup failed");
                false
            }
        };

        DeleteResult {
            removed_from_record_store,
            removed_from_mirror,
        }
    }
}
