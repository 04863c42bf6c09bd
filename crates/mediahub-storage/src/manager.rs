//! Store wiring: builds the three upstream stores from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use mediahub_core::config::{AppConfig, BackendKind};
use mediahub_core::result::AppResult;
use mediahub_core::traits::{CmsMirror, ObjectStore, RecordStore};

use crate::providers::{
    CloudinaryObjectStore, MemoryCmsMirror, MemoryObjectStore, MemoryRecordStore,
    WebflowMirror, XanoRecordStore,
};

/// The upstream stores the reconciliation layer talks to.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Authoritative file and folder records.
    pub records: Arc<dyn RecordStore>,
    /// Binary storage folder namespace.
    pub objects: Arc<dyn ObjectStore>,
    /// Public collection mirror.
    pub mirror: Arc<dyn CmsMirror>,
}

impl Stores {
    /// Assemble stores from explicit instances.
    pub fn new(
        records: Arc<dyn RecordStore>,
        objects: Arc<dyn ObjectStore>,
        mirror: Arc<dyn CmsMirror>,
    ) -> Self {
        Self {
            records,
            objects,
            mirror,
        }
    }

    /// Build the stores selected by `config.backend`.
    ///
    /// Missing credentials do not fail here; each store reports them when an
    /// endpoint first needs it.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        match config.backend {
            BackendKind::Http => {
                info!("Using HTTP upstream stores");
                Ok(Self::new(
                    Arc::new(XanoRecordStore::new(config.record_store.clone())?),
                    Arc::new(CloudinaryObjectStore::new(config.object_store.clone())?),
                    Arc::new(WebflowMirror::new(config.cms_mirror.clone())?),
                ))
            }
            BackendKind::Memory => {
                warn!("Using in-memory upstream stores; nothing is persisted");
                Ok(Self::in_memory())
            }
        }
    }

    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryObjectStore::new()),
            Arc::new(MemoryCmsMirror::new()),
        )
    }
}
