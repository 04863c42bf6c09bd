//! Linear substring search over raw record-store rows.

use serde::Deserialize;
use serde_json::Value;

use mediahub_core::types::PageRequest;
use mediahub_core::types::pagination::DEFAULT_PAGE_SIZE;

/// Searchable fields, including the capitalized and alternate spellings
/// some rows carry.
const SEARCH_FIELDS: &[&str] = &[
    "title",
    "Title",
    "description",
    "Description",
    "author",
    "submitted_by",
    "category",
    "Category",
    "station",
    "Station",
    "file_type",
    "tags",
];

/// Query string of the media list and search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
}

impl MediaQuery {
    /// Whether no search or pagination parameter was given.
    pub fn is_empty(&self) -> bool {
        self.q.is_none() && self.page.is_none() && self.page_size.is_none()
    }

    /// The requested page, defaulting to page 1 of 100.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// The trimmed, lowercased needle, if any.
    pub fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
    }
}

/// Keep the rows matching `needle` (already lowercased), in order.
pub fn filter_records(records: Vec<Value>, needle: Option<&str>) -> Vec<Value> {
    match needle {
        None => records,
        Some(needle) => records
            .into_iter()
            .filter(|r| record_matches(r, needle))
            .collect(),
    }
}

/// Case-insensitive substring match over the searchable fields.
pub fn record_matches(record: &Value, needle: &str) -> bool {
    SEARCH_FIELDS.iter().any(|key| match record.get(*key) {
        Some(Value::String(s)) => s.to_lowercase().contains(needle),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.to_lowercase().contains(needle)),
        _ => false,
    })
}
