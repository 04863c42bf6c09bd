//! Folder entity model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mediahub_core::types::RecordId;

/// A folder. `path` is the canonical identifier; uniqueness is assumed,
/// never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    /// Folder id (record-store id, or a timestamp for synthetic folders).
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Full slash-delimited path.
    pub path: String,
    /// Path of the parent; `/` for top-level folders.
    #[serde(default = "root_path")]
    pub parent_path: String,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

impl FolderRecord {
    /// Parse a record-store folder row, tolerating missing optional fields.
    pub fn from_row(row: &Value) -> Option<Self> {
        let id = RecordId::from_json(row.get("id")?)?;
        let path = row.get("path").and_then(Value::as_str)?.to_string();
        let name = row
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| last_segment(&path).to_string());
        let parent_path = row
            .get("parent_path")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| parent_of(&path));
        let created_at = row.get("created_at").and_then(Value::as_i64).unwrap_or(0);
        Some(Self {
            id,
            name,
            path,
            parent_path,
            created_at,
        })
    }

    /// Whether the folder sits directly under the root.
    pub fn is_top_level(&self) -> bool {
        self.parent_path.trim_matches('/').is_empty()
    }
}

fn root_path() -> String {
    "/".to_string()
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

fn parent_of(path: &str) -> String {
    match path.trim_matches('/').rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => root_path(),
    }
}

/// Keep `[A-Za-z0-9-_]` and whitespace, then collapse whitespace runs
/// into a single `_`. Leading and trailing whitespace is dropped.
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Object-store path of a child folder. A missing, empty, or `/` parent
/// means the root.
pub fn compose_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path.map(|p| p.trim_matches('/')) {
        Some(parent) if !parent.is_empty() => format!("{parent}/{name}"),
        _ => name.to_string(),
    }
}
