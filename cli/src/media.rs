//! File collaborator: reads media from disk and turns it into data URIs.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use std::path::{Path, PathBuf};

use base64::Engine as _;
use tracing::debug;
use vrtour::media::{DecodeFailure, MediaSource};

/// MIME type for a media file, by extension.
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        _ => return None,
    };
    Some(mime)
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Read and encode one media file. Unreadable files and unknown types come
/// back as a [`DecodeFailure`] for the editor to report.
pub async fn load(path: PathBuf) -> Result<MediaSource, DecodeFailure> {
    let name = file_name(&path);
    let Some(mime) = mime_for(&path) else {
        return Err(DecodeFailure::new(name, "unsupported media type"));
    };
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => return Err(DecodeFailure::new(name, e.to_string())),
    };
    if bytes.is_empty() {
        return Err(DecodeFailure::new(name, "file is empty"));
    }
    debug!(file = %path.display(), %mime, bytes = bytes.len(), "media: loaded");
    Ok(MediaSource::new(data_uri(mime, &bytes), name))
}
