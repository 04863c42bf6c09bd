//! Folder operations. Folders live in the object store namespace; the
//! record store only keeps an optional `folders` table used for listing and
//! for validating move targets.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument, warn};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::traits::{ObjectStore, RecordStore};
use mediahub_core::types::RecordId;
use mediahub_entity::folder::{FolderRecord, compose_path, sanitize_name};

/// Which store a folder listing reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderSource {
    /// The object store namespace.
    Cloudinary,
    /// The record store `folders` table.
    #[default]
    Database,
}

impl FromStr for FolderSource {
    type Err = std::convert::Infallible;

    /// Anything other than `cloudinary` reads the database.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("cloudinary") {
            Self::Cloudinary
        } else {
            Self::Database
        })
    }
}

/// Manages folders.
#[derive(Debug, Clone)]
pub struct FolderService {
    records: Arc<dyn RecordStore>,
    objects: Arc<dyn ObjectStore>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(records: Arc<dyn RecordStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { records, objects }
    }

    /// Create a folder in the object store and describe it.
    ///
    /// The returned record is synthetic: its id and timestamp are the
    /// current Unix time in milliseconds and nothing is written to the
    /// record store.
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, parent_path: Option<&str>) -> AppResult<FolderRecord> {
        let name = sanitize_name(name);
        if name.is_empty() {
            return Err(AppError::validation(
                "Folder name must contain at least one letter or number",
            ));
        }
        let path = compose_path(parent_path, &name);

        self.objects
            .create_folder(&path)
            .await
            .map_err(|e| e.context("Failed to create folder"))?;

        let now = Utc::now().timestamp_millis();
        let parent = parent_path
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .unwrap_or("/")
            .to_string();

        info!(path = %path, "Folder created");
        Ok(FolderRecord {
            id: RecordId::Number(now),
            name,
            path,
            parent_path: parent,
            created_at: now,
        })
    }

    /// Delete an empty folder. Returns the deleted path.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: Option<&str>) -> AppResult<String> {
        let path = path
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::validation("Folder path is required"))?
            .to_string();

        let file_count = self
            .objects
            .count_resources(&path)
            .await
            .map_err(|e| e.context("Failed to delete folder"))?;
        if file_count > 0 {
            warn!(path = %path, file_count, "Refusing to delete non-empty folder");
            return Err(AppError::validation(
                "Folder is not empty. Move or delete its files first.",
            )
            .with_field("file_count", file_count));
        }

        self.objects
            .delete_folder(&path)
            .await
            .map_err(|e| e.context("Failed to delete folder"))?;

        info!(path = %path, "Folder deleted");
        Ok(path)
    }

    /// List folders from the chosen source. The object store listing is
    /// scoped to `parent`; the database listing returns every row.
    #[instrument(skip(self))]
    pub async fn list(&self, source: FolderSource, parent: Option<&str>) -> AppResult<Vec<Value>> {
        match source {
            FolderSource::Cloudinary => {
                let folders = self
                    .objects
                    .list_folders(parent)
                    .await
                    .map_err(|e| e.context("Failed to list folders"))?;
                folders
                    .into_iter()
                    .map(|f| serde_json::to_value(f).map_err(AppError::from))
                    .collect()
            }
            FolderSource::Database => {
                self.records.ensure_configured()?;
                self.records
                    .list_folders()
                    .await
                    .map_err(|e| e.context("Failed to list folders"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use mediahub_core::error::ErrorKind;
    use mediahub_storage::providers::{MemoryObjectStore, MemoryRecordStore};

    fn service(records: MemoryRecordStore, objects: MemoryObjectStore) -> (FolderService, Arc<MemoryObjectStore>) {
        let objects = Arc::new(objects);
        (FolderService::new(Arc::new(records), objects.clone()), objects)
    }

    #[tokio::test]
    async fn test_create_sanitizes_name() {
        let (svc, objects) = service(MemoryRecordStore::new(), MemoryObjectStore::new());
        let folder = svc.create("My Folder!!", Some("/")).await.unwrap();
        assert_eq!(folder.name, "My_Folder");
        assert_eq!(folder.path, "My_Folder");
        assert_eq!(folder.parent_path, "/");
        assert_eq!(folder.id, RecordId::Number(folder.created_at));
        assert!(objects.has_folder("My_Folder").await);
    }

    #[tokio::test]
    async fn test_create_nested() {
        let (svc, _) = service(MemoryRecordStore::new(), MemoryObjectStore::new());
        let folder = svc.create("Morning Drive", Some("/Shows/")).await.unwrap();
        assert_eq!(folder.path, "Shows/Morning_Drive");
        assert_eq!(folder.parent_path, "Shows");
    }

    #[tokio::test]
    async fn test_create_rejects_name_without_valid_characters() {
        let (svc, objects) = service(MemoryRecordStore::new(), MemoryObjectStore::new());
        let err = svc.create("!!!", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(objects.calls().create_folder, 0);
    }

    #[tokio::test]
    async fn test_create_upstream_failure() {
        let (svc, _) = service(MemoryRecordStore::new(), MemoryObjectStore::new().failing_creates());
        let err = svc.create("x", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Upstream);
        assert_eq!(err.message, "Failed to create folder");
    }

    #[tokio::test]
    async fn test_delete_non_empty_folder_is_refused() {
        let (svc, objects) = service(
            MemoryRecordStore::new(),
            MemoryObjectStore::new().with_resources("Shows", 3),
        );
        let err = svc.delete(Some("Shows")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.fields.get("file_count"), Some(&json!(3)));
        assert_eq!(objects.calls().delete_folder, 0);
        assert!(objects.has_folder("Shows").await);
    }

    #[tokio::test]
    async fn test_delete_empty_folder() {
        let (svc, objects) = service(MemoryRecordStore::new(), MemoryObjectStore::new().with_folder("Old"));
        assert_eq!(svc.delete(Some("/Old/")).await.unwrap(), "Old");
        assert!(!objects.has_folder("Old").await);
    }

    #[tokio::test]
    async fn test_delete_requires_path() {
        let (svc, _) = service(MemoryRecordStore::new(), MemoryObjectStore::new());
        assert_eq!(svc.delete(None).await.unwrap_err().message, "Folder path is required");
        assert!(svc.delete(Some("/")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_sources() {
        let (svc, _) = service(
            MemoryRecordStore::new().without_folders_table(),
            MemoryObjectStore::new().with_folder("Shows/Morning"),
        );
        assert!(svc.list(FolderSource::Database, None).await.unwrap().is_empty());

        let roots = svc.list(FolderSource::Cloudinary, None).await.unwrap();
        assert_eq!(roots, vec![json!({"name": "Shows", "path": "Shows"})]);

        let children = svc.list(FolderSource::Cloudinary, Some("Shows")).await.unwrap();
        assert_eq!(children[0]["path"], json!("Shows/Morning"));
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("Cloudinary".parse::<FolderSource>().unwrap(), FolderSource::Cloudinary);
        assert_eq!("anything".parse::<FolderSource>().unwrap(), FolderSource::Database);
    }
}
