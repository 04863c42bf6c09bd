//! Xano record store client.
//!
//! Every table is a REST collection under the API group base URL:
//! `GET/POST {base}/{table}` and `GET/PATCH/DELETE {base}/{table}/{id}`,
//! authenticated with a bearer key.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use mediahub_core::config::RecordStoreConfig;
use mediahub_core::result::AppResult;
use mediahub_core::traits::RecordStore;
use mediahub_core::types::RecordId;

use super::http;

const STORE: &str = "Xano";

/// HTTPS record store backed by a Xano API group.
#[derive(Debug, Clone)]
pub struct XanoRecordStore {
    config: RecordStoreConfig,
    client: Client,
}

impl XanoRecordStore {
    /// Create a new client from configuration.
    pub fn new(config: RecordStoreConfig) -> AppResult<Self> {
        let client = http::build_client(config.timeout_seconds)?;
        Ok(Self { config, client })
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(config: RecordStoreConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn table_url(&self, table: &str, id: Option<&RecordId>) -> AppResult<Url> {
        let base = self.config.require_base_url()?;
        let id = id.map(ToString::to_string);
        http::endpoint(base, std::iter::once(table).chain(id.as_deref()))
    }

    fn authorized(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let key = self.config.require_api_key()?;
        Ok(request
            .bearer_auth(key)
            .header(reqwest::header::CONTENT_TYPE, "application/json"))
    }

    async fn fetch_rows(&self, table: &str) -> AppResult<Option<Vec<Value>>> {
        let url = self.table_url(table, None)?;
        let response = self.authorized(self.client.get(url))?.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = http::json_body(http::check(STORE, response).await?).await?;
        Ok(Some(rows_of(body)))
    }
}

/// List endpoints answer with a bare array, or wrap it as `items`/`records`.
fn rows_of(body: Value) -> Vec<Value> {
    match body {
        Value::Array(rows) => rows,
        Value::Object(mut obj) => ["items", "records"]
            .iter()
            .find_map(|key| match obj.remove(*key) {
                Some(Value::Array(rows)) => Some(rows),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl RecordStore for XanoRecordStore {
    fn ensure_configured(&self) -> AppResult<()> {
        self.config.require_api_key()?;
        self.config.require_base_url()?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_records(&self) -> AppResult<Vec<Value>> {
        let table = &self.config.records_table;
        let rows = self.fetch_rows(table).await?.ok_or_else(|| {
            http::status_error(STORE, StatusCode::NOT_FOUND, &format!("table '{table}' not found"))
        })?;
        debug!(count = rows.len(), "Fetched records");
        Ok(rows)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_record(&self, id: &RecordId) -> AppResult<Option<Value>> {
        let url = self.table_url(&self.config.records_table, Some(id))?;
        let response = self.authorized(self.client.get(url))?.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = http::json_body(http::check(STORE, response).await?).await?;
        Ok((!body.is_null()).then_some(body))
    }

    #[instrument(skip(self, fields))]
    async fn create_record(&self, fields: &Map<String, Value>) -> AppResult<Value> {
        let url = self.table_url(&self.config.records_table, None)?;
        let response = self
            .authorized(self.client.post(url))?
            .json(fields)
            .send()
            .await?;
        http::json_body(http::check(STORE, response).await?).await
    }

    #[instrument(skip(self, fields), fields(id = %id))]
    async fn update_record(&self, id: &RecordId, fields: &Map<String, Value>) -> AppResult<Value> {
        let url = self.table_url(&self.config.records_table, Some(id))?;
        let response = self
            .authorized(self.client.patch(url))?
            .json(fields)
            .send()
            .await?;
        http::json_body(http::check(STORE, response).await?).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_record(&self, id: &RecordId) -> AppResult<()> {
        let url = self.table_url(&self.config.records_table, Some(id))?;
        let response = self.authorized(self.client.delete(url))?.send().await?;
        http::check(STORE, response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_folders(&self) -> AppResult<Vec<Value>> {
        match self.fetch_rows(&self.config.folders_table).await? {
            Some(rows) => Ok(rows),
            None => {
                warn!(table = %self.config.folders_table, "Folders table not found, treating as empty");
                Ok(Vec::new())
            }
        }
    }
}
