//! Request DTOs with validation.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Folder creation request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Display name; sanitized before use.
    #[validate(
        required(message = "Folder name is required"),
        length(min = 1, message = "Folder name is required")
    )]
    #[serde(default)]
    pub name: Option<String>,
    /// Parent path; empty or `/` is the root.
    #[serde(default, alias = "parentPath")]
    pub parent_path: Option<String>,
}

/// Folder path, from the query string or the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderPathParams {
    #[serde(default)]
    pub path: Option<String>,
}

/// Query of the folder list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderListParams {
    /// `cloudinary` or `database` (default).
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// Aircheck track list write.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveTracksRequest {
    #[serde(default)]
    pub tracks: Option<Value>,
}
