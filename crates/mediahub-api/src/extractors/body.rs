//! Lenient JSON body extractor.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use mediahub_core::error::AppError;

use crate::error::ApiError;

/// JSON request body that may be absent.
///
/// An empty body or a literal `null` yields `None`, so handlers can answer
/// with their own "required" message. Malformed JSON is a 400.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub Option<T>);

impl<T> JsonBody<T> {
    /// The body, or `T::default()` when none was sent.
    pub fn or_default(self) -> T
    where
        T: Default,
    {
        self.0.unwrap_or_default()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::validation(format!("Failed to read request body: {}", e.body_text()))
        })?;
        Ok(Self(parse_body(&bytes)?))
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))
}
