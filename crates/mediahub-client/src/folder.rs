//! Folder wrapper over the folder endpoints, plus client-side rename.

use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_entity::batch::BatchUpdate;
use mediahub_entity::file::FileRecord;
use mediahub_entity::folder::FolderRecord;

use crate::api::ApiClient;
use crate::media::MediaClient;

/// Folder operations.
#[derive(Debug, Clone)]
pub struct FolderClient {
    api: ApiClient,
}

impl FolderClient {
    /// Wrap an API connection.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every folder in the record store. Any failure yields an empty list.
    #[instrument(skip(self))]
    pub async fn fetch_all_folders(&self) -> Vec<FolderRecord> {
        match self.try_fetch_all_folders().await {
            Ok(folders) => folders,
            Err(e) => {
                warn!(error = %e, "Fetching folders failed, returning empty list");
                Vec::new()
            }
        }
    }

    async fn try_fetch_all_folders(&self) -> AppResult<Vec<FolderRecord>> {
        let mut url = self.api.url(&["folder-list"])?;
        url.query_pairs_mut().append_pair("source", "database");
        let body = self.api.send(self.api.http().get(url)).await?;
        Ok(body
            .as_array()
            .map(|rows| rows.iter().filter_map(FolderRecord::from_row).collect())
            .unwrap_or_default())
    }

    /// Create a folder under `parent_path` (root when `None`).
    #[instrument(skip(self))]
    pub async fn create_folder(
        &self,
        name: &str,
        parent_path: Option<&str>,
    ) -> AppResult<FolderRecord> {
        let url = self.api.url(&["folder-create"])?;
        let body = self
            .api
            .send(
                self.api
                    .http()
                    .post(url)
                    .json(&json!({ "name": name, "parent_path": parent_path })),
            )
            .await?;
        let folder = body
            .get("folder")
            .cloned()
            .ok_or_else(|| AppError::upstream("Folder create response carried no folder"))?;
        Ok(serde_json::from_value(folder)?)
    }

    /// Delete an empty folder.
    #[instrument(skip(self))]
    pub async fn delete_folder(&self, path: &str) -> AppResult<()> {
        let mut url = self.api.url(&["folder-delete"])?;
        url.query_pairs_mut().append_pair("path", path);
        self.api.send(self.api.http().delete(url)).await?;
        Ok(())
    }

    /// Rewrite the `folder_path` of every file at or below `old_path` so it
    /// sits below `new_path`. Returns the number of files updated.
    #[instrument(skip(self, media, files))]
    pub async fn rename_folder(
        &self,
        media: &MediaClient,
        files: &[FileRecord],
        old_path: &str,
        new_path: &str,
    ) -> AppResult<usize> {
        let updates = rename_updates(files, old_path, new_path);
        if updates.is_empty() {
            return Ok(0);
        }
        media.batch_update_files(&updates).await?;
        info!(count = updates.len(), old_path, new_path, "Folder renamed");
        Ok(updates.len())
    }
}

/// Batch updates moving every file under `old_path` to `new_path`.
pub fn rename_updates(files: &[FileRecord], old_path: &str, new_path: &str) -> Vec<BatchUpdate> {
    files
        .iter()
        .filter_map(|file| {
            let rebased = rebase_path(&file.folder_path, old_path, new_path)?;
            let mut fields = Map::new();
            fields.insert("folder_path".to_string(), Value::String(rebased));
            Some(BatchUpdate {
                id: file.id.clone(),
                fields,
            })
        })
        .collect()
}

/// `path` with its `old` prefix replaced by `new`, matching whole segments
/// only. `None` when `path` is not at or below `old`.
pub fn rebase_path(path: &str, old: &str, new: &str) -> Option<String> {
    let path = path.trim_matches('/');
    let old = old.trim_matches('/');
    let new = new.trim_matches('/');
    if old.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(old)?;
    if rest.is_empty() {
        Some(new.to_string())
    } else if let Some(tail) = rest.strip_prefix('/') {
        Some(if new.is_empty() {
            tail.to_string()
        } else {
            format!("{new}/{tail}")
        })
    } else {
        None
    }
}
