//! Object store trait (binary storage and its folder namespace).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A folder in the object store namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectFolder {
    /// Last path segment.
    pub name: String,
    /// Full slash-delimited path.
    pub path: String,
}

/// Folder operations on the object store. Binaries themselves are never
/// deleted by this layer.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a folder. An already existing folder is a success.
    async fn create_folder(&self, path: &str) -> AppResult<()>;

    /// Delete an (empty) folder.
    async fn delete_folder(&self, path: &str) -> AppResult<()>;

    /// Number of resources stored directly in the folder.
    async fn count_resources(&self, path: &str) -> AppResult<u64>;

    /// List the root folders, or the sub-folders of `parent`.
    async fn list_folders(&self, parent: Option<&str>) -> AppResult<Vec<ObjectFolder>>;
}
