//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use mediahub_core::error::{AppError, ErrorKind};

/// Status code for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorKind::Configuration
        | ErrorKind::Upstream
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error body: `{error, code, details?, ...fields}`.
pub fn error_body(err: &AppError) -> Value {
    let mut body = Map::new();
    body.insert("error".to_string(), Value::String(err.message.clone()));
    body.insert("code".to_string(), Value::String(err.kind.to_string()));
    if let Some(details) = &err.details {
        body.insert("details".to_string(), Value::String(details.clone()));
    }
    for (key, value) in &err.fields {
        body.entry(key.clone()).or_insert_with(|| value.clone());
    }
    Value::Object(body)
}

/// Wrapper that lets handlers return `Result<_, ApiError>` while services
/// keep returning `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);
        if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                details = err.details.as_deref().unwrap_or(""),
                "Request failed"
            );
        } else {
            tracing::debug!(kind = %err.kind, error = %err.message, "Request rejected");
        }
        (status, Json(error_body(&err))).into_response()
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
