//! Shared-secret gate for admin writes.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the admin password.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Rejects `POST`/`PUT` requests whose `X-Admin-Password` header does not
/// match the configured secret. Reads pass through.
pub async fn require_admin_for_writes(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if matches!(*request.method(), Method::POST | Method::PUT) {
        let supplied = request
            .headers()
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok());
        if let Err(e) = state.track_service.authorize(supplied) {
            warn!(path = %request.uri().path(), "Admin write rejected");
            return Err(e.into());
        }
    }
    Ok(next.run(request).await)
}
