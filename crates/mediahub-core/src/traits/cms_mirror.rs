//! CMS mirror trait (public collection kept loosely in sync).

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::result::AppResult;
use crate::types::RecordId;

/// Public-facing collection that mirrors file records for website display.
#[async_trait]
pub trait CmsMirror: Send + Sync + std::fmt::Debug + 'static {
    /// Fail with a configuration error when the mirror is disabled or
    /// missing credentials.
    fn ensure_configured(&self) -> AppResult<()>;

    /// Every collection item, as `{id, fieldData, ...}` objects.
    async fn list_items(&self) -> AppResult<Vec<Value>>;

    /// Find the collection item mirroring the given record.
    async fn find_item_by_file_id(&self, file_id: &RecordId) -> AppResult<Option<String>>;

    /// Create a collection item and return its id.
    async fn create_item(&self, field_data: &Map<String, Value>) -> AppResult<String>;

    /// Delete a collection item.
    async fn delete_item(&self, item_id: &str) -> AppResult<()>;

    /// Publish a single collection item.
    async fn publish_item(&self, item_id: &str) -> AppResult<()>;

    /// Publish the whole site.
    async fn publish_site(&self) -> AppResult<()>;
}
