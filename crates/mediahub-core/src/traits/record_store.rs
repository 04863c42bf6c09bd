//! Record store trait (the authoritative file metadata table).

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::result::AppResult;
use crate::types::RecordId;

/// Authoritative store of file metadata rows and folder rows.
///
/// Records travel as raw JSON: the layer forwards caller-supplied fields
/// verbatim and leaves field-name normalization to the client side.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fail with a configuration error when the store cannot be called.
    /// Every endpoint calls this before any other work.
    fn ensure_configured(&self) -> AppResult<()>;

    /// Fetch every file record.
    async fn list_records(&self) -> AppResult<Vec<Value>>;

    /// Fetch one record; `Ok(None)` when the store answers 404.
    async fn get_record(&self, id: &RecordId) -> AppResult<Option<Value>>;

    /// Insert a record and return the stored row.
    async fn create_record(&self, fields: &Map<String, Value>) -> AppResult<Value>;

    /// Partially update a record and return the stored row.
    async fn update_record(&self, id: &RecordId, fields: &Map<String, Value>) -> AppResult<Value>;

    /// Remove a record.
    async fn delete_record(&self, id: &RecordId) -> AppResult<()>;

    /// Fetch the folder rows. A missing folders table counts as empty.
    async fn list_folders(&self) -> AppResult<Vec<Value>>;
}
