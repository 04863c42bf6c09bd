//! Shared HTTP plumbing for the MediaHub API wrappers.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;

use mediahub_core::error::{AppError, ErrorKind};
use mediahub_core::result::AppResult;

use crate::config::ClientConfig;

/// Keys of the API error body that are not extra fields.
const ERROR_BODY_KEYS: &[&str] = &["error", "code", "details"];

/// Connection to the MediaHub API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;
        Ok(Self::with_client(&config.api_base_url, client))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// URL of an endpoint below the API base, one path segment per element.
    pub fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid API URL '{}': {e}", self.base_url))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AppError::configuration(format!("API URL '{}' cannot be a base", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Send a request and read its JSON body. Non-2xx answers become an
    /// [`AppError`] rebuilt from the API's error body.
    pub async fn send(&self, request: RequestBuilder) -> AppResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Rebuild an error from a `{error, code, details?, ...}` body.
pub(crate) fn api_error(status: StatusCode, body: &str) -> AppError {
    let kind = match status {
        StatusCode::BAD_REQUEST => ErrorKind::Validation,
        StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::METHOD_NOT_ALLOWED => ErrorKind::MethodNotAllowed,
        _ => ErrorKind::Upstream,
    };

    let Ok(Value::Object(parsed)) = serde_json::from_str::<Value>(body) else {
        return AppError::new(
            kind,
            format!("Request failed with status {}", status.as_u16()),
        )
        .with_details(body.trim());
    };

    let message = parsed
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    let mut err = AppError::new(kind, message);
    if let Some(details) = parsed.get("details").and_then(Value::as_str) {
        err = err.with_details(details);
    }
    for (key, value) in parsed {
        if !ERROR_BODY_KEYS.contains(&key.as_str()) {
            err = err.with_field(&key, value);
        }
    }
    err
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_url_encodes_segments() {
        let api = ApiClient::with_client("http://localhost:8888/api/", Client::new());
        assert_eq!(
            api.url(&["update", "a b"]).unwrap().as_str(),
            "http://localhost:8888/api/update/a%20b"
        );
    }

    #[test]
    fn test_api_error_from_body() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Folder is not empty. Move or delete its files first.", "code": "VALIDATION", "file_count": 3}"#,
        );
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.fields.get("file_count"), Some(&json!(3)));
        assert!(!err.fields.contains_key("code"));

        let err = api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "Failed to batch delete records", "details": "Failed to delete record 2"}"#,
        );
        assert_eq!(err.kind, ErrorKind::Upstream);
        assert_eq!(err.details.as_deref(), Some("Failed to delete record 2"));
    }

    #[test]
    fn test_api_error_from_plain_text() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.message, "Request failed with status 502");
        assert_eq!(err.details.as_deref(), Some("upstream down"));
    }
}
