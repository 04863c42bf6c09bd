//! Upstream store configuration (record store, object store, CMS mirror).

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Record store (Xano) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    /// API group base URL, e.g. `https://x.xano.io/api:abcd`.
    #[serde(default)]
    pub base_url: String,
    /// Bearer API key. Checked per request rather than at startup.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Table holding file records.
    #[serde(default = "default_records_table")]
    pub records_table: String,
    /// Table holding folder records.
    #[serde(default = "default_folders_table")]
    pub folders_table: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            records_table: default_records_table(),
            folders_table: default_folders_table(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl RecordStoreConfig {
    /// Returns the API key, or the configuration error every endpoint
    /// reports before touching the network.
    pub fn require_api_key(&self) -> AppResult<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::configuration(
                "XANO_API_KEY environment variable not configured",
            )),
        }
    }

    /// Returns the base URL without a trailing slash.
    pub fn require_base_url(&self) -> AppResult<&str> {
        let url = self.base_url.trim_end_matches('/');
        if url.is_empty() {
            return Err(AppError::configuration(
                "XANO_BASE_URL environment variable not configured",
            ));
        }
        Ok(url)
    }
}

/// Object store (Cloudinary) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    /// Cloud name.
    #[serde(default)]
    pub cloud_name: Option<String>,
    /// Admin API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Admin API secret.
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Unsigned upload preset used by clients.
    #[serde(default)]
    pub upload_preset: Option<String>,
    /// API root.
    #[serde(default = "default_cloudinary_base")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            upload_preset: None,
            api_base_url: default_cloudinary_base(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ObjectStoreConfig {
    /// Returns `(cloud_name, api_key, api_secret)` when all are present.
    pub fn require_credentials(&self) -> AppResult<(&str, &str, &str)> {
        match (
            non_empty(&self.cloud_name),
            non_empty(&self.api_key),
            non_empty(&self.api_secret),
        ) {
            (Some(cloud), Some(key), Some(secret)) => Ok((cloud, key, secret)),
            _ => Err(AppError::configuration(
                "Cloudinary credentials not configured",
            )),
        }
    }
}

/// CMS mirror (Webflow) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsMirrorConfig {
    /// Whether uploads are mirrored at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bearer API token.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Site id (used for site publish).
    #[serde(default)]
    pub site_id: Option<String>,
    /// Collection id receiving the items.
    #[serde(default)]
    pub collection_id: Option<String>,
    /// API root.
    #[serde(default = "default_webflow_base")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for CmsMirrorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_token: None,
            site_id: None,
            collection_id: None,
            api_base_url: default_webflow_base(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl CmsMirrorConfig {
    /// Returns `(api_token, site_id, collection_id)` when the mirror is
    /// enabled and fully configured.
    pub fn require_credentials(&self) -> AppResult<(&str, &str, &str)> {
        if !self.enabled {
            return Err(AppError::configuration("Webflow configuration missing"));
        }
        match (
            non_empty(&self.api_token),
            non_empty(&self.site_id),
            non_empty(&self.collection_id),
        ) {
            (Some(token), Some(site), Some(collection)) => Ok((token, site, collection)),
            _ => Err(AppError::configuration("Webflow configuration missing")),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn default_records_table() -> String {
    "user_submission".to_string()
}

fn default_folders_table() -> String {
    "folders".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_cloudinary_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_webflow_base() -> String {
    "https://api.webflow.com/v2".to_string()
}

fn default_true() -> bool {
    true
}
