//! Plumbing shared by the HTTPS store clients.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;

use mediahub_core::error::{AppError, ErrorKind};
use mediahub_core::result::AppResult;

/// Build a client with the configured per-request timeout.
pub(crate) fn build_client(timeout_seconds: u64) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.max(1)))
        .build()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
        })
}

/// Parse `base` and append each segment, percent-encoding as needed.
pub(crate) fn endpoint<'a>(
    base: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> AppResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::configuration(format!("Invalid upstream URL '{base}': {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| AppError::configuration(format!("Upstream URL '{base}' cannot be a base")))?;
        path.pop_if_empty();
        for segment in segments {
            for part in segment.split('/').filter(|p| !p.is_empty()) {
                path.push(part);
            }
        }
    }
    Ok(url)
}

/// Pass a 2xx response through; turn anything else into an upstream error
/// carrying the status and the response body.
pub(crate) async fn check(store: &str, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(store, status, &body))
}

pub(crate) fn status_error(store: &str, status: StatusCode, body: &str) -> AppError {
    AppError::upstream(format!("{store} API error: {} - {}", status.as_u16(), body.trim()))
}

/// Read a JSON body. An empty body reads as `null`.
pub(crate) async fn json_body(response: Response) -> AppResult<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}
