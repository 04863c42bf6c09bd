//! Webflow CMS mirror client (Data API v2).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use mediahub_core::config::CmsMirrorConfig;
use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::traits::CmsMirror;
use mediahub_core::types::RecordId;

use super::http;

const STORE: &str = "Webflow";
const PAGE_LIMIT: usize = 100;

/// CMS mirror backed by a Webflow collection.
#[derive(Debug, Clone)]
pub struct WebflowMirror {
    config: CmsMirrorConfig,
    client: Client,
}

impl WebflowMirror {
    /// Create a new client from configuration.
    pub fn new(config: CmsMirrorConfig) -> AppResult<Self> {
        let client = http::build_client(config.timeout_seconds)?;
        Ok(Self { config, client })
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(config: CmsMirrorConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn items_url(&self, tail: &[&str]) -> AppResult<Url> {
        let (_, _, collection) = self.config.require_credentials()?;
        http::endpoint(
            &self.config.api_base_url,
            ["collections", collection, "items"]
                .into_iter()
                .chain(tail.iter().copied()),
        )
    }

    fn authorized(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let (token, _, _) = self.config.require_credentials()?;
        Ok(request
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    async fn fetch_page(&self, offset: usize) -> AppResult<ItemPage> {
        let mut url = self.items_url(&[])?;
        url.query_pairs_mut()
            .append_pair("limit", &PAGE_LIMIT.to_string())
            .append_pair("offset", &offset.to_string());
        let response = self.authorized(self.client.get(url))?.send().await?;
        let body = http::json_body(http::check(STORE, response).await?).await?;

        Ok(ItemPage {
            items: body
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            total: body
                .pointer("/pagination/total")
                .and_then(Value::as_u64)
                .map(|t| t as usize),
        })
    }
}

/// One page of collection items.
struct ItemPage {
    items: Vec<Value>,
    total: Option<usize>,
}

impl ItemPage {
    /// Whether nothing follows, given the items consumed so far.
    fn is_last(&self, consumed: usize) -> bool {
        self.items.len() < PAGE_LIMIT || self.total.is_some_and(|t| consumed >= t)
    }
}

/// Whether a collection item mirrors the given record.
fn item_matches(item: &Value, file_id: &RecordId) -> bool {
    item.get("fieldData")
        .and_then(|f| f.get("file-id"))
        .and_then(RecordId::from_json)
        .is_some_and(|id| id.same_as(file_id))
}

#[async_trait]
impl CmsMirror for WebflowMirror {
    fn ensure_configured(&self) -> AppResult<()> {
        self.config.require_credentials().map(|_| ())
    }

    #[instrument(skip(self))]
    async fn list_items(&self) -> AppResult<Vec<Value>> {
        let mut all = Vec::new();
        let mut offset = 0usize;
        loop {
            let page = self.fetch_page(offset).await?;
            offset += page.items.len();
            let exhausted = page.is_last(offset);
            all.extend(page.items);
            if exhausted {
                debug!(count = all.len(), "Listed mirror items");
                return Ok(all);
            }
        }
    }

    #[instrument(skip(self), fields(file_id = %file_id))]
    async fn find_item_by_file_id(&self, file_id: &RecordId) -> AppResult<Option<String>> {
        let mut offset = 0usize;
        loop {
            let page = self.fetch_page(offset).await?;
            if let Some(found) = page.items.iter().find(|item| item_matches(item, file_id)) {
                return Ok(found.get("id").and_then(Value::as_str).map(str::to_string));
            }
            offset += page.items.len();
            if page.is_last(offset) {
                debug!(scanned = offset, "No mirror item for file");
                return Ok(None);
            }
        }
    }

    #[instrument(skip(self, field_data))]
    async fn create_item(&self, field_data: &Map<String, Value>) -> AppResult<String> {
        let url = self.items_url(&[])?;
        let payload = json!({
            "isArchived": false,
            "isDraft": false,
            "fieldData": field_data,
        });
        let response = self
            .authorized(self.client.post(url))?
            .json(&payload)
            .send()
            .await?;
        let body = http::json_body(http::check(STORE, response).await?).await?;
        body.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::upstream("Webflow API error: created item has no id"))
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, item_id: &str) -> AppResult<()> {
        let url = self.items_url(&[item_id])?;
        let response = self.authorized(self.client.delete(url))?.send().await?;
        http::check(STORE, response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn publish_item(&self, item_id: &str) -> AppResult<()> {
        let url = self.items_url(&["publish"])?;
        let response = self
            .authorized(self.client.post(url))?
            .json(&json!({ "itemIds": [item_id] }))
            .send()
            .await?;
        http::check(STORE, response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn publish_site(&self) -> AppResult<()> {
        let (_, site, _) = self.config.require_credentials()?;
        let url = http::endpoint(&self.config.api_base_url, ["sites", site, "publish"])?;
        let response = self
            .authorized(self.client.post(url))?
            .json(&json!({ "publishToWebflowSubdomain": true }))
            .send()
            .await?;
        http::check(STORE, response).await?;
        Ok(())
    }
}
