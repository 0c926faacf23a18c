//! Media type whitelist and detection
//!
//! Only JPEG, PNG and WEBP are accepted as reference images. Detection runs an
//! ordered list of strategies (file extension, then the MIME hint supplied with
//! the file) and fails with a named error when none of them finds a type.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted reference image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/webp")]
    Webp,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Webp => "image/webp",
        }
    }

    /// Maps a bare extension (no dot, any case) to a media type.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "webp" => Some(MediaType::Webp),
            _ => None,
        }
    }

    /// Parses a MIME string such as `image/png` or `IMAGE/JPEG; q=1`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            "image/webp" => Some(MediaType::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks at the filename's extension only. Unknown or missing extensions yield `None`.
pub fn detect_media_type(filename: &str) -> Option<MediaType> {
    filename
        .rsplit_once('.')
        .and_then(|(_, extension)| MediaType::from_extension(extension))
}

/// Identifies the format from the leading magic bytes, if recognizable.
pub fn sniff_media_type(bytes: &[u8]) -> Option<MediaType> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some(MediaType::Jpeg),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(MediaType::Png),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some(MediaType::Webp),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStrategy {
    Extension,
    Hint,
}

/// Strategies tried by [`resolve_media_type`], first match wins.
pub const DETECTION_ORDER: [DetectionStrategy; 2] =
    [DetectionStrategy::Extension, DetectionStrategy::Hint];

impl DetectionStrategy {
    /// `Ok(None)` means "not found, try the next strategy".
    pub fn detect(&self, filename: &str, hint: Option<&str>) -> Result<Option<MediaType>> {
        match self {
            DetectionStrategy::Extension => Ok(detect_media_type(filename)),
            DetectionStrategy::Hint => {
                let hint = match hint.map(str::trim) {
                    Some(hint) if !hint.is_empty() => hint,
                    _ => return Ok(None),
                };
                MediaType::from_mime(hint)
                    .map(Some)
                    .ok_or_else(|| Error::UnsupportedMediaType {
                        filename: filename.to_string(),
                        media_type: hint.to_string(),
                    })
            }
        }
    }
}

pub fn resolve_media_type(filename: &str, hint: Option<&str>) -> Result<MediaType> {
    for strategy in DETECTION_ORDER {
        if let Some(media_type) = strategy.detect(filename, hint)? {
            tracing::debug!(
                "Resolved media type of {} via {:?}: {}",
                filename,
                strategy,
                media_type
            );
            return Ok(media_type);
        }
    }
    Err(Error::MissingMediaType(filename.to_string()))
}
