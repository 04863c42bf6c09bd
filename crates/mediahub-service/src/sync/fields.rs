//! Mapping from a record-store row to CMS collection field data.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use mediahub_entity::file::normalize::parse_tags;
use mediahub_entity::file::transform::{self, MediaKind};

const THUMB_WIDTH: u32 = 400;
const THUMB_HEIGHT: u32 = 300;

/// Field data for a new collection item.
pub fn build_field_data(record: &Value) -> Map<String, Value> {
    let title = text(record, &["title", "name"]).unwrap_or_else(|| "Untitled".to_string());
    let media_url = text(record, &["media_url", "url", "URL"]).unwrap_or_default();
    let (media_type, youtube_id, vimeo_id) = classify_media(&media_url);

    let tags = match record.get("tags") {
        Some(Value::String(s)) => s.clone(),
        other => parse_tags(other).join(", "),
    };

    let mut fields = Map::new();
    fields.insert("name".into(), json!(title));
    fields.insert("slug".into(), json!(slugify(&title)));
    fields.insert("media-url".into(), json!(media_url));
    fields.insert("thumbnail".into(), json!(mirror_thumbnail(record)));
    fields.insert(
        "description".into(),
        json!(text(record, &["description"]).unwrap_or_default()),
    );
    fields.insert(
        "category".into(),
        json!(text(record, &["category"]).unwrap_or_else(|| "Files".to_string())),
    );
    fields.insert(
        "station".into(),
        json!(text(record, &["station"]).unwrap_or_default()),
    );
    fields.insert(
        "submitted-by".into(),
        json!(text(record, &["submitted_by", "author"]).unwrap_or_else(|| "Unknown".to_string())),
    );
    fields.insert(
        "file-type".into(),
        json!(text(record, &["file_type"]).unwrap_or_else(|| "file".to_string())),
    );
    fields.insert(
        "file-size".into(),
        record.get("file_size").cloned().unwrap_or(json!(0)),
    );
    fields.insert("tags".into(), json!(tags));
    fields.insert("upload-date".into(), json!(upload_date(record)));
    fields.insert(
        "cloudinary-public-id".into(),
        json!(public_id(&media_url)),
    );
    fields.insert(
        "file-id".into(),
        record.get("id").cloned().unwrap_or(Value::Null),
    );
    fields.insert("media-type".into(), json!(media_type));
    fields.insert("youtube-video-id".into(), json!(youtube_id));
    fields.insert("vimeo-video-id".into(), json!(vimeo_id));
    fields.insert(
        "duration".into(),
        json!(text(record, &["duration"]).unwrap_or_default()),
    );
    fields
}

/// URL-friendly slug: lowercase ASCII letters, digits, and single dashes.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    kept.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// `Upload`, `YouTube`, or `Vimeo`, with the embed id for the latter two.
pub fn classify_media(url: &str) -> (&'static str, String, String) {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        ("YouTube", youtube_id(url), String::new())
    } else if url.contains("vimeo.com") {
        ("Vimeo", String::new(), vimeo_id(url))
    } else {
        ("Upload", String::new(), String::new())
    }
}

fn youtube_id(url: &str) -> String {
    ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/", "youtube.com/v/"]
        .iter()
        .find_map(|marker| {
            let start = url.find(marker)? + marker.len();
            let id: String = url[start..]
                .chars()
                .take_while(|c| *c != '&' && *c != '?' && !c.is_whitespace())
                .collect();
            (!id.is_empty()).then_some(id)
        })
        .unwrap_or_default()
}

fn vimeo_id(url: &str) -> String {
    url.find("vimeo.com/")
        .map(|i| {
            url[i + "vimeo.com/".len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect()
        })
        .unwrap_or_default()
}

/// 400x300 thumbnail for the mirror: an object-store transform when the
/// media is an image, video, or PDF served by the object store, otherwise a
/// placeholder image.
pub fn mirror_thumbnail(record: &Value) -> String {
    let fill = format!("w_{THUMB_WIDTH},h_{THUMB_HEIGHT},c_fill,f_auto,q_auto,g_auto");

    if let Some(stored) = text(record, &["thumbnail"]).filter(|t| t.contains("cloudinary.com")) {
        let cleaned = strip_transform(&stored);
        if let Some(url) = transform::apply_transform(&cleaned, &fill) {
            return url;
        }
    }

    let media_url = text(record, &["media_url", "url", "URL"]).unwrap_or_default();
    let kind = media_kind(record, &media_url);
    let on_object_store = media_url.contains("cloudinary.com");

    match kind {
        MediaKind::Image if !media_url.is_empty() => {
            if on_object_store {
                transform::apply_transform(&media_url, &fill).unwrap_or(media_url)
            } else {
                media_url
            }
        }
        MediaKind::Video | MediaKind::Pdf if on_object_store => {
            transform::sized_thumbnail(&media_url, kind, &fill).unwrap_or_else(|| placeholder("File"))
        }
        MediaKind::Audio => format!(
            "https://via.placeholder.com/{THUMB_WIDTH}x{THUMB_HEIGHT}/4A90E2/FFFFFF?text=Audio+File"
        ),
        _ => {
            let label = text(record, &["category"])
                .map(|c| capitalize(&c))
                .or_else(|| text(record, &["file_type"]))
                .unwrap_or_else(|| "File".to_string());
            placeholder(&label)
        }
    }
}

fn media_kind(record: &Value, media_url: &str) -> MediaKind {
    let declared = text(record, &["file_type"])
        .map(|t| MediaKind::from_mime(&t))
        .filter(|k| *k != MediaKind::Other);
    let by_category = text(record, &["category"]).and_then(|c| match c.to_lowercase().as_str() {
        "image" | "images" => Some(MediaKind::Image),
        "video" | "videos" => Some(MediaKind::Video),
        "audio" => Some(MediaKind::Audio),
        "documents" => Some(MediaKind::Pdf),
        _ => None,
    });
    declared
        .or(by_category)
        .unwrap_or_else(|| MediaKind::from_mime(&transform::detect_file_type(media_url)))
}

/// Drop a transformation segment directly after `/upload/` so a new one can
/// be applied.
fn strip_transform(url: &str) -> String {
    let Some(idx) = url.find("/upload/") else {
        return url.to_string();
    };
    let head = &url[..idx + "/upload/".len()];
    let tail = &url[head.len()..];
    match tail.split_once('/') {
        Some((first, rest)) if is_transform_segment(first) => format!("{head}{rest}"),
        _ => url.to_string(),
    }
}

fn is_transform_segment(segment: &str) -> bool {
    segment.split(',').all(|part| {
        part.split_once('_')
            .is_some_and(|(key, _)| !key.is_empty() && key.len() <= 3 && key.chars().all(|c| c.is_ascii_lowercase()))
    })
}

fn placeholder(label: &str) -> String {
    format!(
        "https://via.placeholder.com/{THUMB_WIDTH}x{THUMB_HEIGHT}/6B7280/FFFFFF?text={}",
        encode_component(label)
    )
}

fn encode_component(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn public_id(media_url: &str) -> String {
    transform::extract_public_id(media_url).unwrap_or_else(|| {
        let last = media_url.rsplit('/').next().unwrap_or_default();
        last.split('.').next().unwrap_or_default().to_string()
    })
}

/// Upload date as ISO 8601 with milliseconds, from `upload_date` or
/// `created_at` (ISO string or epoch millis), else now.
fn upload_date(record: &Value) -> String {
    let now = || Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let Some(value) = ["upload_date", "created_at"]
        .iter()
        .find_map(|k| record.get(*k).filter(|v| !v.is_null()))
    else {
        return now();
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    };
    parsed
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(now)
}

fn text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match record.get(*k) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
