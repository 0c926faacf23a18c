//! Data models and structures
//!
//! Defines the image values that flow through one generation request and the
//! environment-driven configuration.

use crate::media::MediaType;
use crate::prompts::PromptStyle;
use crate::{Error, Result};
use base64::Engine as _;
use std::time::Duration;

/// Raw image bytes with a resolved, whitelisted media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub content: Vec<u8>,
    pub media_type: MediaType,
}

impl ImageInput {
    pub fn new(content: Vec<u8>, media_type: MediaType) -> Self {
        Self {
            content,
            media_type,
        }
    }

    /// Plain base64 of the content, without any `data:` URL framing.
    pub fn encode(&self) -> EncodedImage {
        EncodedImage {
            data: base64::engine::general_purpose::STANDARD.encode(&self.content),
            media_type: self.media_type,
        }
    }
}

/// Transport form of an [`ImageInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: String,
    pub media_type: MediaType,
}

/// Image returned by the model. Always treated as PNG when re-displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
}

impl GeneratedImage {
    pub const MIME_TYPE: &'static str = "image/png";

    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", Self::MIME_TYPE, self.to_base64())
    }
}

// Configuration
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
    pub prompt_style: PromptStyle,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let gemini_api_key = var("GEMINI_API_KEY")
            .or_else(|| var("API_KEY"))
            .ok_or_else(|| Error::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let prompt_style = match var("PROMPT_STYLE") {
            Some(value) => value.parse()?,
            None => PromptStyle::default(),
        };

        let request_timeout = match var("GEMINI_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value.trim().parse::<u64>().map_err(|_| {
                    Error::Configuration(format!(
                        "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        value
                    ))
                })?;
                if secs == 0 {
                    return Err(Error::Configuration(
                        "GEMINI_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            gemini_api_key,
            image_model: var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            prompt_style,
            base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
        })
    }
}
