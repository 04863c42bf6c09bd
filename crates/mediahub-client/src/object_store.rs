//! Unsigned object-store uploads and URL helpers.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, Url};
use serde_json::{Value, json};
use tracing::{info, instrument};

use mediahub_core::config::ObjectStoreConfig;
use mediahub_core::error::{AppError, ErrorKind};
use mediahub_core::result::AppResult;
use mediahub_entity::file::normalize::from_object_store;
use mediahub_entity::file::{FileRecord, MediaKind, transform};

/// Folder uploads land in when none is given.
pub const DEFAULT_UPLOAD_FOLDER: &str = "media-manager";

/// A file to upload.
#[derive(Debug, Clone)]
pub struct UploadFile<'a> {
    /// Original file name, kept in the upload context.
    pub file_name: &'a str,
    /// MIME type.
    pub mime_type: &'a str,
    /// Raw bytes.
    pub data: &'a [u8],
}

/// Browser-style unsigned uploads to the object store.
#[derive(Debug, Clone)]
pub struct ObjectStoreClient {
    config: ObjectStoreConfig,
    client: Client,
}

impl ObjectStoreClient {
    /// Create a client from configuration.
    pub fn new(config: ObjectStoreConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;
        Ok(Self { config, client })
    }

    /// Upload `file` into `folder` (default [`DEFAULT_UPLOAD_FOLDER`]) and
    /// return the stored asset as a canonical record.
    #[instrument(skip(self, file), fields(file_name = file.file_name, size = file.data.len()))]
    pub async fn upload(&self, file: &UploadFile<'_>, folder: Option<&str>) -> AppResult<FileRecord> {
        let url = self.upload_url(file.mime_type)?;
        let preset = self
            .config
            .upload_preset
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AppError::configuration("Cloudinary upload preset not configured"))?;

        let body = json!({
            "file": data_uri(file.mime_type, file.data),
            "upload_preset": preset,
            "folder": folder.filter(|f| !f.trim().is_empty()).unwrap_or(DEFAULT_UPLOAD_FOLDER),
            "context": format!("filename={}", file.file_name),
        });

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        let parsed: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = parsed
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            return Err(AppError::upstream(format!("Upload failed: {message}")));
        }

        let record = from_object_store(&parsed)
            .ok_or_else(|| AppError::upstream("Upload failed: response carried no asset"))?;
        info!(public_id = %record.id, "File uploaded");
        Ok(record)
    }

    /// Thumbnail URL of a stored asset.
    pub fn thumbnail_url(url: &str, mime_type: &str) -> String {
        transform::thumbnail_url(url, MediaKind::from_mime(mime_type))
    }

    /// Preview URL of a stored asset.
    pub fn preview_url(url: &str, mime_type: &str) -> String {
        transform::preview_url(url, MediaKind::from_mime(mime_type))
    }

    fn upload_url(&self, mime_type: &str) -> AppResult<Url> {
        let cloud = self
            .config
            .cloud_name
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::configuration("Cloudinary cloud name not configured"))?;
        let base = self.config.api_base_url.trim_end_matches('/');
        let mut url = Url::parse(base)
            .map_err(|e| AppError::configuration(format!("Invalid Cloudinary URL '{base}': {e}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::configuration(format!("Cloudinary URL '{base}' cannot be a base")))?
            .pop_if_empty()
            .extend([cloud, resource_type(mime_type), "upload"]);
        Ok(url)
    }
}

/// Object-store resource type for a MIME type.
pub fn resource_type(mime_type: &str) -> &'static str {
    match MediaKind::from_mime(mime_type) {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
        _ => "raw",
    }
}

fn data_uri(mime_type: &str, data: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(data))
}
