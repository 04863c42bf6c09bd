//! Route definitions for the MediaHub HTTP API.
//!
//! Endpoints are mounted under `/api`; batch move is also reachable at its
//! legacy serverless path. Every route answers unsupported methods with a
//! JSON 405.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Legacy mount point of batch move.
pub const LEGACY_BATCH_MOVE_PATH: &str = "/.netlify/functions/batch-move-to-folder";

/// Build the Axum router with all routes, threading `state` through every
/// handler.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(batch_routes())
        .merge(folder_routes())
        .merge(media_routes())
        .merge(sync_routes())
        .merge(aircheck_routes(state.clone()));

    Router::new()
        .nest("/api", api_routes)
        .route(
            LEGACY_BATCH_MOVE_PATH,
            post(handlers::batch::batch_move).fallback(handlers::method_not_allowed),
        )
        .with_state(state)
}

/// Batch delete, update, move
fn batch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/batch-delete",
            post(handlers::batch::batch_delete).fallback(handlers::method_not_allowed),
        )
        .route(
            "/batch-update",
            post(handlers::batch::batch_update).fallback(handlers::method_not_allowed),
        )
        .route(
            "/batch-move-to-folder",
            post(handlers::batch::batch_move).fallback(handlers::method_not_allowed),
        )
}

/// Folder lifecycle
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folder-create",
            post(handlers::folder::create_folder).fallback(handlers::method_not_allowed),
        )
        .route(
            "/folder-delete",
            delete(handlers::folder::delete_folder).fallback(handlers::method_not_allowed),
        )
        .route(
            "/folder-list",
            get(handlers::folder::list_folders).fallback(handlers::method_not_allowed),
        )
}

/// Media records and health
fn media_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/media",
            get(handlers::media::list_media).fallback(handlers::method_not_allowed),
        )
        .route(
            "/search",
            get(handlers::media::search_media).fallback(handlers::method_not_allowed),
        )
        .route(
            "/upload",
            post(handlers::media::upload).fallback(handlers::method_not_allowed),
        )
        .route(
            "/update/{id}",
            patch(handlers::media::update_media).fallback(handlers::method_not_allowed),
        )
        .route(
            "/delete/{id}",
            delete(handlers::media::delete_media).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health::health).fallback(handlers::method_not_allowed),
        )
}

/// CMS mirror sync
fn sync_routes() -> Router<AppState> {
    Router::new().route(
        "/webflow-sync",
        get(handlers::sync::sync_mirror_all)
            .post(handlers::sync::sync_mirror)
            .fallback(handlers::method_not_allowed),
    )
}

/// Aircheck tracks; writes require the admin secret
fn aircheck_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/aircheck-tracks",
            get(handlers::aircheck::get_tracks)
                .post(handlers::aircheck::save_tracks)
                .put(handlers::aircheck::save_tracks)
                .fallback(handlers::method_not_allowed),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::admin::require_admin_for_writes,
        ))
}
