//! Batch request/result models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use mediahub_core::types::RecordId;

/// Hard cap on the number of files in one move request.
pub const MAX_MOVE_BATCH: usize = 50;

/// One entry of a batch update: fields are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdate {
    /// Record to patch.
    pub id: RecordId,
    /// Partial field set.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Per-id entry of a successful batch delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Deleted record.
    pub id: RecordId,
    /// Always `true`; a failure aborts the whole batch.
    pub success: bool,
}

/// Outcome of one file in a batch move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    /// Whether the file was moved.
    pub success: bool,
    /// The file.
    pub file_id: RecordId,
    /// Upstream error message when the move failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    /// Successful entry.
    pub fn ok(file_id: RecordId) -> Self {
        Self {
            success: true,
            file_id,
            error: None,
        }
    }

    /// Failed entry.
    pub fn failed(file_id: RecordId, error: impl Into<String>) -> Self {
        Self {
            success: false,
            file_id,
            error: Some(error.into()),
        }
    }
}

/// Aggregate of a batch move. Partial failure is reported here, not in
/// the HTTP status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMoveOutcome {
    /// `true` only when every item succeeded.
    pub success: bool,
    /// Number of files requested.
    pub total: usize,
    /// Number of files moved.
    pub succeeded: usize,
    /// Number of files that failed.
    pub failed: usize,
    /// Per-file outcomes in request order.
    pub results: Vec<BatchItemResult>,
}

impl BatchMoveOutcome {
    /// Aggregate per-item results.
    pub fn from_results(results: Vec<BatchItemResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let total = results.len();
        Self {
            success: succeeded == total,
            total,
            succeeded,
            failed: total - succeeded,
            results,
        }
    }

    /// Ids of the files that were moved.
    pub fn moved_ids(&self) -> impl Iterator<Item = &RecordId> {
        self.results.iter().filter(|r| r.success).map(|r| &r.file_id)
    }
}
