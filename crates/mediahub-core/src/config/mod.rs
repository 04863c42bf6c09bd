//! Application configuration schemas.
//!
//! The configuration is loaded once at process start and handed to every
//! store and service constructor. Sources, lowest precedence first:
//! `config/default.toml`, `config/{env}.toml`, `MEDIAHUB__*` environment
//! variables, and finally the conventional unprefixed variables
//! (`XANO_API_KEY`, `CLOUDINARY_CLOUD_NAME`, ...) for any field still unset.

pub mod admin;
pub mod app;
pub mod logging;
pub mod upstream;

use serde::{Deserialize, Serialize};

pub use self::admin::AdminConfig;
pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::upstream::{CmsMirrorConfig, ObjectStoreConfig, RecordStoreConfig};

use crate::error::AppError;

/// Profile loaded when `MEDIAHUB_ENV` is unset. It never switches the
/// backend, so a deploy without the variable still talks to the real stores.
pub const DEFAULT_PROFILE: &str = "production";

/// The configuration profile named by `MEDIAHUB_ENV`, falling back to
/// [`DEFAULT_PROFILE`] when it is unset or blank.
pub fn profile_name(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// Which set of upstream store implementations to wire up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Real HTTPS clients for Xano, Cloudinary and Webflow.
    #[default]
    Http,
    /// Process-local in-memory stores (development and tests).
    Memory,
}

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Upstream backend selection.
    #[serde(default)]
    pub backend: BackendKind,
    /// Record store settings.
    #[serde(default)]
    pub record_store: RecordStoreConfig,
    /// Object store settings.
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
    /// CMS mirror settings.
    #[serde(default)]
    pub cms_mirror: CmsMirrorConfig,
    /// Aircheck shared-secret settings.
    #[serde(default)]
    pub admin: AdminConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MEDIAHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        cfg.apply_env_fallbacks(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Fill still-unset upstream fields from conventional variable names.
    pub fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        fill(&mut self.record_store.api_key, get("XANO_API_KEY"));
        if self.record_store.base_url.is_empty() {
            if let Some(url) = get("XANO_BASE_URL").or_else(|| get("XANO_API_BASE")) {
                self.record_store.base_url = url;
            }
        }

        fill(
            &mut self.object_store.cloud_name,
            get("CLOUDINARY_CLOUD_NAME").or_else(|| get("VITE_CLOUDINARY_CLOUD_NAME")),
        );
        fill(&mut self.object_store.api_key, get("CLOUDINARY_API_KEY"));
        fill(&mut self.object_store.api_secret, get("CLOUDINARY_API_SECRET"));
        fill(
            &mut self.object_store.upload_preset,
            get("CLOUDINARY_UPLOAD_PRESET"),
        );

        fill(
            &mut self.cms_mirror.api_token,
            get("WEBFLOW_API_TOKEN").or_else(|| get("WEBFLOW_API_KEY")),
        );
        fill(&mut self.cms_mirror.site_id, get("WEBFLOW_SITE_ID"));
        fill(
            &mut self.cms_mirror.collection_id,
            get("WEBFLOW_COLLECTION_ID"),
        );

        fill(&mut self.admin.password, get("AIRCHECK_ADMIN_PASSWORD"));
    }
}

fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.as_deref().is_none_or(|v| v.trim().is_empty()) {
        if let Some(v) = value {
            *slot = Some(v);
        }
    }
}
