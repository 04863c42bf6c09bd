//! Upload metadata and its mapping to a record-store row.

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;

/// Metadata of a file already stored in the object store. Values are kept
/// as sent; the record store decides what it accepts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadMetadata {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub station: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
    /// Object-store URL of the binary.
    #[serde(default)]
    pub url: Option<Value>,
    #[serde(default)]
    pub thumbnail: Option<Value>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub folder_path: Option<Value>,
}

impl UploadMetadata {
    /// Validate an upload. `None` means the request had no body. A record
    /// without a media URL is unusable, so the URL must be a non-blank
    /// string.
    pub fn validate(metadata: Option<Self>) -> AppResult<Self> {
        let metadata =
            metadata.ok_or_else(|| AppError::validation("Request body is required"))?;
        match &metadata.url {
            Some(Value::String(url)) if !url.trim().is_empty() => Ok(metadata),
            _ => Err(AppError::validation("Media URL is required")),
        }
    }

    /// Record-store row for this upload, stamped with the current time.
    pub fn into_record(self) -> Map<String, Value> {
        let mut row = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                row.insert(key.to_string(), value);
            }
        };
        put("title", self.title);
        put("description", self.description);
        put("category", self.category);
        put("type", self.kind);
        put("station", self.station);
        put("notes", self.notes);
        put("tags", self.tags);
        put("media_url", self.url);
        put("thumbnail", self.thumbnail);
        put("file_size", self.size);
        put(
            "upload_date",
            Some(json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))),
        );
        put("duration", Some(or_empty(self.duration)));
        put("folder_path", Some(or_empty(self.folder_path)));
        row
    }
}

fn or_empty(value: Option<Value>) -> Value {
    match value {
        Some(Value::Null) | None => json!(""),
        Some(v) => v,
    }
}
