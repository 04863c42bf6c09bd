//! CMS mirror reads, normalized to canonical records.

use std::sync::Arc;

use tracing::{debug, instrument};

use mediahub_core::config::CmsMirrorConfig;
use mediahub_core::result::AppResult;
use mediahub_core::traits::CmsMirror;
use mediahub_entity::file::FileRecord;
use mediahub_entity::file::normalize::from_cms_mirror;
use mediahub_storage::providers::WebflowMirror;

/// Reads the public collection.
#[derive(Debug, Clone)]
pub struct CmsMirrorClient {
    mirror: Arc<dyn CmsMirror>,
}

impl CmsMirrorClient {
    /// Wrap any mirror implementation.
    pub fn new(mirror: Arc<dyn CmsMirror>) -> Self {
        Self { mirror }
    }

    /// Talk to Webflow directly.
    pub fn from_config(config: CmsMirrorConfig) -> AppResult<Self> {
        Ok(Self::new(Arc::new(WebflowMirror::new(config)?)))
    }

    /// Every collection item that normalizes to a usable record.
    #[instrument(skip(self))]
    pub async fn fetch_items(&self) -> AppResult<Vec<FileRecord>> {
        self.mirror.ensure_configured()?;
        let items = self.mirror.list_items().await?;
        let files: Vec<FileRecord> = items.iter().filter_map(from_cms_mirror).collect();
        debug!(items = items.len(), files = files.len(), "Fetched mirror items");
        Ok(files)
    }
}
