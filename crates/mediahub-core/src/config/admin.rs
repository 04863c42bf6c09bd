//! Shared-secret settings for the aircheck track endpoint.

use serde::{Deserialize, Serialize};

/// Admin settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Value expected in the `X-Admin-Password` header. When unset every
    /// write to the aircheck track configuration is rejected.
    #[serde(default)]
    pub password: Option<String>,
    /// Record-store row that holds the aircheck player configuration.
    #[serde(default = "default_aircheck_record_id")]
    pub aircheck_record_id: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: None,
            aircheck_record_id: default_aircheck_record_id(),
        }
    }
}

fn default_aircheck_record_id() -> u64 {
    3541
}
