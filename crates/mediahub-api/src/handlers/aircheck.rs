//! Aircheck track list handlers. Writes pass through the admin-secret
//! middleware first.

use axum::Json;
use axum::extract::State;

use mediahub_service::aircheck::TrackListing;

use crate::dto::request::SaveTracksRequest;
use crate::dto::response::TracksSaved;
use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// GET /api/aircheck-tracks
pub async fn get_tracks(State(state): State<AppState>) -> Json<TrackListing> {
    Json(state.track_service.get().await)
}

/// POST|PUT /api/aircheck-tracks
pub async fn save_tracks(
    State(state): State<AppState>,
    body: JsonBody<SaveTracksRequest>,
) -> ApiResult<Json<TracksSaved>> {
    let tracks = state.track_service.save(body.or_default().tracks).await?;
    Ok(Json(TracksSaved {
        success: true,
        message: "Tracks saved successfully".to_string(),
        tracks,
    }))
}
