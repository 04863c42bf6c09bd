//! Folder create, delete and list handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use mediahub_service::folder::FolderSource;

use crate::dto::request::{CreateFolderRequest, FolderListParams, FolderPathParams};
use crate::dto::response::{FolderCreated, FolderDeleted};
use crate::dto::validate_request;
use crate::error::ApiResult;
use crate::extractors::{JsonBody, QueryParams};
use crate::state::AppState;

/// POST /api/folder-create
pub async fn create_folder(
    State(state): State<AppState>,
    body: JsonBody<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<FolderCreated>)> {
    let req = body.or_default();
    validate_request(&req)?;
    let name = req.name.unwrap_or_default();

    let folder = state
        .folder_service
        .create(&name, req.parent_path.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FolderCreated {
            success: true,
            folder,
        }),
    ))
}

/// DELETE /api/folder-delete?path=... (or body `{path}`)
pub async fn delete_folder(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<FolderPathParams>,
    body: JsonBody<FolderPathParams>,
) -> ApiResult<Json<FolderDeleted>> {
    let path = query
        .path
        .filter(|p| !p.trim().is_empty())
        .or(body.or_default().path);

    let path = state.folder_service.delete(path.as_deref()).await?;
    Ok(Json(FolderDeleted {
        success: true,
        message: "Folder deleted successfully".to_string(),
        path,
    }))
}

/// GET /api/folder-list?source=cloudinary|database&parent=...
pub async fn list_folders(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<FolderListParams>,
) -> ApiResult<Json<Vec<Value>>> {
    let source = params
        .source
        .as_deref()
        .and_then(|s| s.parse::<FolderSource>().ok())
        .unwrap_or_default();

    let folders = state
        .folder_service
        .list(source, params.parent.as_deref())
        .await?;
    Ok(Json(folders))
}
