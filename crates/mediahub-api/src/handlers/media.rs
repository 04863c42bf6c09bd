//! Media record handlers: list, search, upload, update, delete.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Map, Value};

use mediahub_core::types::PageResponse;
use mediahub_service::media::{MediaListing, MediaQuery, UploadMetadata};

use crate::dto::response::{Ack, UploadAccepted};
use crate::error::ApiResult;
use crate::extractors::{JsonBody, QueryParams};
use crate::state::AppState;

/// GET /api/media?q=&page=&pageSize=
pub async fn list_media(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MediaQuery>,
) -> ApiResult<Json<MediaListing>> {
    Ok(Json(state.media_service.list(&query).await?))
}

/// GET /api/search?q=&page=&pageSize=
pub async fn search_media(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MediaQuery>,
) -> ApiResult<Json<PageResponse<Value>>> {
    Ok(Json(state.media_service.search(&query).await?))
}

/// POST /api/upload
pub async fn upload(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UploadMetadata>,
) -> ApiResult<Json<UploadAccepted>> {
    let record = state.media_service.upload(body).await?;
    Ok(Json(UploadAccepted {
        success: true,
        record,
    }))
}

/// PATCH /api/update/{id}
pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<Map<String, Value>>,
) -> ApiResult<Json<Value>> {
    let fields = body.or_default();
    Ok(Json(state.media_service.update(&id, &fields).await?))
}

/// DELETE /api/delete/{id}
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Ack>> {
    state.media_service.delete(&id).await?;
    Ok(Json(Ack { success: true }))
}
