//! Input validation for batch move. Checks run in a fixed order and the
//! first failure wins; nothing here touches the network.

use serde::Deserialize;
use serde_json::Value;

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::types::RecordId;
use mediahub_entity::batch::MAX_MOVE_BATCH;

/// Raw move request. Fields stay untyped so each malformed shape gets its
/// own message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMoveRequest {
    #[serde(default)]
    pub file_ids: Option<Value>,
    /// `null` or absent means the root folder.
    #[serde(default)]
    pub folder_id: Option<Value>,
}

/// A validated move request.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTarget {
    pub file_ids: Vec<RecordId>,
    /// `None` is the root.
    pub folder_id: Option<RecordId>,
}

/// Validate a move request. `None` means the request had no body.
pub fn validate_move(request: Option<BatchMoveRequest>) -> AppResult<MoveTarget> {
    let request = request.ok_or_else(|| AppError::validation("Request body is required"))?;

    let ids = match request.file_ids {
        Some(Value::Array(ids)) => ids,
        _ => return Err(AppError::validation("fileIds must be an array")),
    };
    if ids.is_empty() {
        return Err(AppError::validation("fileIds array cannot be empty"));
    }
    if ids.len() > MAX_MOVE_BATCH {
        return Err(AppError::validation(format!(
            "Cannot move more than {MAX_MOVE_BATCH} files at once"
        )));
    }
    let file_ids = ids
        .iter()
        .map(positive_id)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AppError::validation("All fileIds must be positive numbers"))?;

    let folder_id = match request.folder_id {
        None | Some(Value::Null) => None,
        Some(ref value) => Some(positive_id(value).ok_or_else(|| {
            AppError::validation("folderId must be null or a positive number")
        })?),
    };

    Ok(MoveTarget {
        file_ids,
        folder_id,
    })
}

/// A positive whole number. Floats with no fractional part (`7.0`) count.
fn positive_id(value: &Value) -> Option<RecordId> {
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .filter(|n| *n > 0)
        .map(RecordId::Number)
}
