//! File record model.

use serde::{Deserialize, Serialize};

use mediahub_core::types::RecordId;

/// Canonical file metadata record, regardless of which upstream it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Identity assigned by the record store.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// URL of the stored binary. Never empty on a normalized record.
    pub media_url: String,
    /// Thumbnail URL (object-store transform or placeholder icon).
    pub thumbnail: String,
    /// MIME type derived from the media URL.
    pub file_type: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Category label.
    pub category: String,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Slash-delimited folder path; empty for the root.
    #[serde(default)]
    pub folder_path: String,
    /// Author or submitter.
    pub author: String,
    /// Creation/upload timestamp as provided upstream.
    pub created_at: String,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Radio station the asset belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// Submitter, when distinct from the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    /// Media duration for audio/video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl FileRecord {
    /// Whether client-side filters consider the record usable.
    pub fn is_valid(&self) -> bool {
        !self.media_url.trim().is_empty()
    }

    /// Whether the record lives in the root folder.
    pub fn is_in_root(&self) -> bool {
        self.folder_path.trim_matches('/').is_empty()
    }

    /// Case-insensitive substring match over the searchable fields.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            self.title.as_str(),
            self.description.as_str(),
            self.author.as_str(),
            self.category.as_str(),
            self.file_type.as_str(),
            self.station.as_deref().unwrap_or_default(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}
