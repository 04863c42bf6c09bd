//! Client configuration.

use serde::{Deserialize, Serialize};

/// Where the MediaHub API lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API mount, e.g. `http://localhost:8888/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `api_base_url`.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8888/api".to_string()
}

fn default_timeout() -> u64 {
    30
}
