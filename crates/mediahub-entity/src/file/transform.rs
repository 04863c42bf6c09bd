//! Object-store (Cloudinary) URL templating and media type detection.
//!
//! Thumbnails and previews are produced by inserting a transformation
//! string after the `/upload/` path segment of a delivery URL, e.g.
//! `.../upload/v1/a.png` becomes `.../upload/w_150,h_150,c_fill,q_auto,f_auto/v1/a.png`.

use serde::{Deserialize, Serialize};

const UPLOAD_SEGMENT: &str = "/upload/";

/// Grid thumbnail transformation.
pub const THUMBNAIL_TRANSFORM: &str = "w_150,h_150,c_fill,q_auto,f_auto";
/// Preview transformation.
pub const PREVIEW_TRANSFORM: &str = "w_800,h_600,c_fit,q_auto,f_auto";

/// Placeholder icon for files without a visual thumbnail.
pub const FILE_PLACEHOLDER: &str = "/icons/file-placeholder.svg";
/// Placeholder icon for audio files.
pub const AUDIO_PLACEHOLDER: &str = "/icons/audio-placeholder.svg";
/// Placeholder icon for word-processing documents.
pub const DOCUMENT_PLACEHOLDER: &str = "/icons/document-placeholder.svg";
/// Placeholder icon for spreadsheets.
pub const SPREADSHEET_PLACEHOLDER: &str = "/icons/spreadsheet-placeholder.svg";
/// Placeholder icon for presentations.
pub const PRESENTATION_PLACEHOLDER: &str = "/icons/presentation-placeholder.svg";

/// Coarse media family used to pick a thumbnail strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Pdf,
    Document,
    Spreadsheet,
    Presentation,
    Text,
    Other,
}

impl MediaKind {
    /// Classify a MIME type.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.starts_with("image/") || mime == "image" {
            Self::Image
        } else if mime.starts_with("video/") || mime == "video" {
            Self::Video
        } else if mime.starts_with("audio/") || mime == "audio" {
            Self::Audio
        } else if mime == "application/pdf" || mime == "pdf" {
            Self::Pdf
        } else if mime.contains("wordprocessingml") || mime == "application/msword" {
            Self::Document
        } else if mime.contains("spreadsheetml") || mime == "text/csv" {
            Self::Spreadsheet
        } else if mime.contains("presentationml") {
            Self::Presentation
        } else if mime.starts_with("text/") {
            Self::Text
        } else {
            Self::Other
        }
    }
}

/// Lowercased extension of the last path segment, ignoring query and fragment.
pub fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    let (stem, ext) = last.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Infer a MIME type from the extension in a URL.
pub fn detect_file_type(url: &str) -> String {
    let Some(ext) = url_extension(url) else {
        return "application/octet-stream".to_string();
    };
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" | "gif" | "bmp" | "webp" => format!("image/{ext}"),
        "svg" => "image/svg+xml".to_string(),
        "mp4" | "avi" | "mov" | "wmv" | "flv" | "webm" | "mkv" => format!("video/{ext}"),
        "mp3" => "audio/mpeg".to_string(),
        "wav" | "ogg" | "aac" | "flac" | "m4a" => format!("audio/{ext}"),
        "pdf" => "application/pdf".to_string(),
        "doc" | "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string()
        }
        "xls" | "xlsx" => {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string()
        }
        "ppt" | "pptx" => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation".to_string()
        }
        "csv" => "text/csv".to_string(),
        "txt" => "text/plain".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

/// Whether the URL is an object-store delivery URL that accepts transforms.
pub fn is_cloudinary_url(url: &str) -> bool {
    url.contains("cloudinary.com") && url.contains(UPLOAD_SEGMENT)
}

/// Insert a transformation after the first `/upload/` segment.
pub fn apply_transform(url: &str, transformation: &str) -> Option<String> {
    let idx = url.find(UPLOAD_SEGMENT)?;
    let split = idx + UPLOAD_SEGMENT.len();
    Some(format!("{}{}/{}", &url[..split], transformation, &url[split..]))
}

/// Replace the extension of the last path segment.
pub fn with_extension(url: &str, ext: &str) -> String {
    let slash = url.rfind('/').map(|i| i + 1).unwrap_or(0);
    match url[slash..].rfind('.') {
        Some(dot) if dot > 0 => format!("{}.{}", &url[..slash + dot], ext),
        _ => format!("{url}.{ext}"),
    }
}

/// Thumbnail URL for a media URL of the given kind.
pub fn thumbnail_url(url: &str, kind: MediaKind) -> String {
    sized_thumbnail(url, kind, THUMBNAIL_TRANSFORM)
        .unwrap_or_else(|| placeholder_for(kind).to_string())
}

/// Thumbnail at an arbitrary transformation; `None` when only a
/// placeholder would do.
pub fn sized_thumbnail(url: &str, kind: MediaKind, transformation: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    match kind {
        MediaKind::Image => apply_transform(url, transformation),
        MediaKind::Video => apply_transform(url, &format!("{transformation},so_0"))
            .map(|u| with_extension(&u, "jpg")),
        MediaKind::Pdf => apply_transform(url, &format!("{transformation},pg_1"))
            .map(|u| with_extension(&u, "jpg")),
        _ => None,
    }
}

/// Preview URL (larger, aspect-preserving). Non-visual media keep the
/// original URL.
pub fn preview_url(url: &str, kind: MediaKind) -> String {
    match kind {
        MediaKind::Image | MediaKind::Video => {
            apply_transform(url, PREVIEW_TRANSFORM).unwrap_or_else(|| url.to_string())
        }
        _ => url.to_string(),
    }
}

/// Placeholder icon for a media kind.
pub fn placeholder_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Audio => AUDIO_PLACEHOLDER,
        MediaKind::Document => DOCUMENT_PLACEHOLDER,
        MediaKind::Spreadsheet => SPREADSHEET_PLACEHOLDER,
        MediaKind::Presentation => PRESENTATION_PLACEHOLDER,
        _ => FILE_PLACEHOLDER,
    }
}

/// Public id of a delivery URL: the part after `/upload/`, without the
/// version segment and the extension.
pub fn extract_public_id(url: &str) -> Option<String> {
    if !is_cloudinary_url(url) {
        return None;
    }
    let idx = url.find(UPLOAD_SEGMENT)?;
    let mut rest = &url[idx + UPLOAD_SEGMENT.len()..];
    if let Some((first, tail)) = rest.split_once('/') {
        if first.len() > 1
            && first.starts_with('v')
            && first[1..].chars().all(|c| c.is_ascii_digit())
        {
            rest = tail;
        }
    }
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let slash = rest.rfind('/').map(|i| i + 1).unwrap_or(0);
    let id = match rest[slash..].rfind('.') {
        Some(dot) if dot > 0 => &rest[..slash + dot],
        _ => rest,
    };
    (!id.is_empty()).then(|| id.to_string())
}
