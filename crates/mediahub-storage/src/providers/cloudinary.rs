//! Cloudinary object store client (Admin API, folder operations only).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use mediahub_core::config::ObjectStoreConfig;
use mediahub_core::result::AppResult;
use mediahub_core::traits::{ObjectFolder, ObjectStore};

use super::http;

const STORE: &str = "Cloudinary";

/// Object store backed by the Cloudinary Admin API.
#[derive(Debug, Clone)]
pub struct CloudinaryObjectStore {
    config: ObjectStoreConfig,
    client: Client,
}

impl CloudinaryObjectStore {
    /// Create a new client from configuration.
    pub fn new(config: ObjectStoreConfig) -> AppResult<Self> {
        let client = http::build_client(config.timeout_seconds)?;
        Ok(Self { config, client })
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(config: ObjectStoreConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let (cloud, _, _) = self.config.require_credentials()?;
        http::endpoint(
            &self.config.api_base_url,
            std::iter::once(cloud).chain(segments.iter().copied()),
        )
    }

    fn authorized(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let (_, key, secret) = self.config.require_credentials()?;
        Ok(request.basic_auth(key, Some(secret)))
    }
}

#[async_trait]
impl ObjectStore for CloudinaryObjectStore {
    #[instrument(skip(self))]
    async fn create_folder(&self, path: &str) -> AppResult<()> {
        let url = self.url(&["folders", path])?;
        let response = self.authorized(self.client.post(url))?.send().await?;
        let status = response.status();
        if status.is_success() {
            info!(path, "Created object store folder");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::CONFLICT || body.to_lowercase().contains("already exists") {
            debug!(path, "Object store folder already exists");
            return Ok(());
        }
        Err(http::status_error(STORE, status, &body))
    }

    #[instrument(skip(self))]
    async fn delete_folder(&self, path: &str) -> AppResult<()> {
        let url = self.url(&["folders", path])?;
        let response = self.authorized(self.client.delete(url))?.send().await?;
        http::check(STORE, response).await?;
        info!(path, "Deleted object store folder");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_resources(&self, path: &str) -> AppResult<u64> {
        let url = self.url(&["resources", "search"])?;
        let query = json!({
            "expression": format!("folder=\"{path}\""),
            "max_results": 1,
        });
        let response = self
            .authorized(self.client.post(url))?
            .json(&query)
            .send()
            .await?;
        let body = http::json_body(http::check(STORE, response).await?).await?;
        Ok(body.get("total_count").and_then(Value::as_u64).unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn list_folders(&self, parent: Option<&str>) -> AppResult<Vec<ObjectFolder>> {
        let url = match parent.filter(|p| !p.trim_matches('/').is_empty()) {
            Some(parent) => self.url(&["folders", parent])?,
            None => self.url(&["folders"])?,
        };
        let response = self.authorized(self.client.get(url))?.send().await?;
        let body = http::json_body(http::check(STORE, response).await?).await?;
        Ok(parse_folders(&body))
    }
}

fn parse_folders(body: &Value) -> Vec<ObjectFolder> {
    body.get("folders")
        .and_then(Value::as_array)
        .map(|folders| {
            folders
                .iter()
                .filter_map(|f| {
                    let path = f.get("path")?.as_str()?.to_string();
                    let name = f
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| path.rsplit('/').next().unwrap_or_default().to_string());
                    Some(ObjectFolder { name, path })
                })
                .collect()
        })
        .unwrap_or_default()
}
