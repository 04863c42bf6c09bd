//! CMS mirror sync handler.

use axum::Json;
use axum::extract::State;

use mediahub_service::sync::{SyncOutcome, SyncRequest};

use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /api/webflow-sync `{action?, fileId?}`
pub async fn sync_mirror(
    State(state): State<AppState>,
    body: JsonBody<SyncRequest>,
) -> ApiResult<Json<SyncOutcome>> {
    Ok(Json(state.sync_service.run(body.or_default()).await?))
}

/// GET /api/webflow-sync: full sync with default options.
pub async fn sync_mirror_all(State(state): State<AppState>) -> ApiResult<Json<SyncOutcome>> {
    Ok(Json(state.sync_service.run(SyncRequest::default()).await?))
}
