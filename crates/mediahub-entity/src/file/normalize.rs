//! Per-source adapters from raw upstream JSON to [`FileRecord`].
//!
//! Each upstream spells the same fields differently (`title`/`Title`,
//! `media_url`/`URL`/`url`, tags as a comma string or an array). One
//! adapter per source coalesces them; callers never look at raw records.
//! An adapter returns `None` for a record without a usable media URL.

use chrono::Utc;
use serde_json::Value;

use mediahub_core::types::RecordId;

use super::model::FileRecord;
use super::transform::{self, MediaKind};

/// Adapter for record-store rows.
pub fn from_record_store(record: &Value) -> Option<FileRecord> {
    let id = RecordId::from_json(record.get("id")?)?;
    let media_url = first_str(record, &["media_url", "URL", "url"])?;
    let file_type = transform::detect_file_type(&media_url);
    let thumbnail = derive_thumbnail(&media_url, &file_type, first_str(record, &["thumbnail"]));

    let author = first_str(record, &["author", "submitted_by"]).unwrap_or_else(unknown);
    let submitted_by = first_str(record, &["submitted_by", "author"]).unwrap_or_else(unknown);

    Some(FileRecord {
        id,
        title: first_str(record, &["title", "Title"]).unwrap_or_else(|| "Untitled".to_string()),
        description: first_str(record, &["description", "Description"]).unwrap_or_default(),
        media_url,
        thumbnail,
        file_type,
        file_size: first_u64(record, &["file_size", "File Size"]).unwrap_or(0),
        category: first_str(record, &["category", "Category"]).unwrap_or_else(|| "Files".to_string()),
        tags: parse_tags(record.get("tags")),
        folder_path: first_str(record, &["folder_path"]).unwrap_or_default(),
        author,
        created_at: first_timestamp(record, &["upload_date", "Upload Date", "created_at"])
            .unwrap_or_else(now),
        notes: first_str(record, &["notes", "Notes"]),
        station: first_str(record, &["station", "Station"]),
        submitted_by: Some(submitted_by),
        duration: first_str(record, &["duration"]),
    })
}

/// Adapter for object-store upload results and resource listings.
pub fn from_object_store(resource: &Value) -> Option<FileRecord> {
    let public_id = first_str(resource, &["public_id"])?;
    let media_url = first_str(resource, &["secure_url", "url"])?;

    let file_type = match (
        first_str(resource, &["resource_type"]),
        first_str(resource, &["format"]),
    ) {
        (Some(kind), Some(format)) if kind == "image" || kind == "video" => {
            format!("{kind}/{format}")
        }
        _ => transform::detect_file_type(&media_url),
    };
    let thumbnail = derive_thumbnail(&media_url, &file_type, None);

    let title = first_str(resource, &["original_filename"]).unwrap_or_else(|| {
        public_id
            .rsplit('/')
            .next()
            .unwrap_or(public_id.as_str())
            .to_string()
    });

    Some(FileRecord {
        id: RecordId::Text(public_id),
        title,
        description: first_str(resource, &["context.custom.caption"]).unwrap_or_default(),
        media_url,
        thumbnail,
        file_type,
        file_size: first_u64(resource, &["bytes"]).unwrap_or(0),
        category: "Files".to_string(),
        tags: parse_tags(resource.get("tags")),
        folder_path: first_str(resource, &["asset_folder", "folder"]).unwrap_or_default(),
        author: unknown(),
        created_at: first_timestamp(resource, &["created_at"]).unwrap_or_else(now),
        notes: None,
        station: None,
        submitted_by: None,
        duration: first_str(resource, &["duration"]),
    })
}

/// Adapter for CMS-mirror collection items (`{id, fieldData: {...}}`).
pub fn from_cms_mirror(item: &Value) -> Option<FileRecord> {
    let fields = item.get("fieldData").unwrap_or(item);
    let media_url = first_str(fields, &["media-url", "media_url", "url"])?;
    let id = fields
        .get("file-id")
        .and_then(RecordId::from_json)
        .or_else(|| item.get("id").and_then(RecordId::from_json))?;

    let file_type = first_str(fields, &["file-type"])
        .filter(|t| t.contains('/'))
        .unwrap_or_else(|| transform::detect_file_type(&media_url));
    let thumbnail = derive_thumbnail(&media_url, &file_type, first_str(fields, &["thumbnail"]));

    Some(FileRecord {
        id,
        title: first_str(fields, &["name", "title"]).unwrap_or_else(|| "Untitled".to_string()),
        description: first_str(fields, &["description"]).unwrap_or_default(),
        media_url,
        thumbnail,
        file_type,
        file_size: first_u64(fields, &["file-size"]).unwrap_or(0),
        category: first_str(fields, &["category"]).unwrap_or_else(|| "Files".to_string()),
        tags: parse_tags(fields.get("tags")),
        folder_path: first_str(fields, &["folder-path"]).unwrap_or_default(),
        author: first_str(fields, &["submitted-by"]).unwrap_or_else(unknown),
        created_at: first_timestamp(fields, &["upload-date"])
            .or_else(|| first_timestamp(item, &["createdOn"]))
            .unwrap_or_else(now),
        notes: None,
        station: first_str(fields, &["station"]),
        submitted_by: first_str(fields, &["submitted-by"]),
        duration: first_str(fields, &["duration"]),
    })
}

/// Normalize a batch of record-store rows, dropping unusable ones.
pub fn process_records(records: &[Value]) -> Vec<FileRecord> {
    records.iter().filter_map(from_record_store).collect()
}

/// Split tags given as a comma-separated string or a JSON array.
pub fn parse_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn derive_thumbnail(media_url: &str, file_type: &str, stored: Option<String>) -> String {
    let kind = MediaKind::from_mime(file_type);
    transform::sized_thumbnail(media_url, kind, transform::THUMBNAIL_TRANSFORM)
        .or(stored)
        .unwrap_or_else(|| transform::placeholder_for(kind).to_string())
}

/// Resolve a possibly dotted key (`context.custom.caption`).
fn lookup<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(v) = record.get(key) {
        return Some(v);
    }
    key.split('.').try_fold(record, |acc, part| acc.get(part))
}

fn first_str(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match lookup(record, k) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn first_u64(record: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| match lookup(record, k) {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Timestamps arrive as ISO strings or as epoch milliseconds.
fn first_timestamp(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match lookup(record, k) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339()),
        _ => None,
    })
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn now() -> String {
    Utc::now().to_rfc3339()
}
