//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use mediahub_core::config::AppConfig;
use mediahub_service::{
    BatchService, FolderService, MediaService, MirrorSyncService, TrackService,
};
use mediahub_storage::Stores;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Services hold their
/// stores behind `Arc`, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration, loaded once at startup.
    pub config: Arc<AppConfig>,
    pub batch_service: BatchService,
    pub folder_service: FolderService,
    pub media_service: MediaService,
    pub sync_service: MirrorSyncService,
    pub track_service: TrackService,
}

impl AppState {
    /// Wire every service over the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let sync_service = MirrorSyncService::new(stores.records.clone(), stores.mirror.clone());
        Self {
            batch_service: BatchService::new(stores.records.clone()),
            folder_service: FolderService::new(stores.records.clone(), stores.objects.clone()),
            media_service: MediaService::new(stores.records.clone(), sync_service.clone()),
            track_service: TrackService::new(stores.records.clone(), config.admin.clone()),
            sync_service,
            config: Arc::new(config),
        }
    }
}
