//! Health check handler.

use axum::Json;
use axum::extract::State;

use mediahub_service::media::HealthStatus;

use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.media_service.health())
}
