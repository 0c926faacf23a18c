//! Reference image encoding
//!
//! Turns user-selected files into the base64 + media type form the generation
//! API expects. Files are read concurrently; results keep the caller's order.

use crate::media::{resolve_media_type, sniff_media_type};
use crate::models::{EncodedImage, ImageInput};
use crate::{Error, Result};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A raw file as handed over by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub source: ImageSource,
    /// MIME type reported by whoever supplied the file, if any.
    pub mime_hint: Option<String>,
}

impl ImageFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            source: ImageSource::Path(path.to_path_buf()),
            mime_hint: None,
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Bytes(bytes),
            mime_hint: None,
        }
    }

    pub fn with_mime_hint(mut self, hint: impl Into<String>) -> Self {
        self.mime_hint = Some(hint.into());
        self
    }

    async fn read(&self) -> Result<Vec<u8>> {
        match &self.source {
            ImageSource::Path(path) => tokio::fs::read(path).await.map_err(|source| Error::Read {
                filename: self.name.clone(),
                source,
            }),
            ImageSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    /// Resolves the media type and reads the content.
    pub async fn load(&self) -> Result<ImageInput> {
        let media_type = resolve_media_type(&self.name, self.mime_hint.as_deref())?;
        let content = self.read().await?;

        if let Some(sniffed) = sniff_media_type(&content) {
            if sniffed != media_type {
                tracing::warn!(
                    "{} is declared as {} but its content looks like {}",
                    self.name,
                    media_type,
                    sniffed
                );
            }
        }

        Ok(ImageInput::new(content, media_type))
    }
}

pub async fn encode(file: &ImageFile) -> Result<EncodedImage> {
    let input = file.load().await?;
    tracing::debug!(
        "Encoding {} ({} bytes, {})",
        file.name,
        input.content.len(),
        input.media_type
    );
    Ok(input.encode())
}

/// Encodes every file concurrently. Output order matches `files`; the first
/// failure aborts the whole batch.
pub async fn encode_all(files: &[ImageFile]) -> Result<Vec<EncodedImage>> {
    try_join_all(files.iter().map(encode)).await
}
