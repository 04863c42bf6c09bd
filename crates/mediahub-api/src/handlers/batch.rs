//! Batch delete, update and move handlers.

use axum::Json;
use axum::extract::State;

use mediahub_entity::batch::{BatchMoveOutcome, DeleteOutcome};
use mediahub_service::batch::{BatchDeleteRequest, BatchMoveRequest, BatchUpdateRequest};
use serde_json::Value;

use crate::dto::response::BatchResults;
use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /api/batch-delete
pub async fn batch_delete(
    State(state): State<AppState>,
    body: JsonBody<BatchDeleteRequest>,
) -> ApiResult<Json<BatchResults<DeleteOutcome>>> {
    let results = state.batch_service.delete_many(body.or_default()).await?;
    Ok(Json(BatchResults::ok(results)))
}

/// POST /api/batch-update
pub async fn batch_update(
    State(state): State<AppState>,
    body: JsonBody<BatchUpdateRequest>,
) -> ApiResult<Json<BatchResults<Value>>> {
    let results = state.batch_service.update_many(body.or_default()).await?;
    Ok(Json(BatchResults::ok(results)))
}

/// POST /api/batch-move-to-folder
///
/// Per-file failures are reported in the body with a 200.
pub async fn batch_move(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<BatchMoveRequest>,
) -> ApiResult<Json<BatchMoveOutcome>> {
    let outcome = state.batch_service.move_to_folder(body).await?;
    Ok(Json(outcome))
}
