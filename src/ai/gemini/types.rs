//! Gemini `generateContent` payload types.

use crate::models::EncodedImage;
use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding; `Other` catches
/// part kinds this crate does not use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

impl From<&EncodedImage> for Part {
    fn from(image: &EncodedImage) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: image.media_type.as_str().to_string(),
                data: image.data.clone(),
            },
        }
    }
}

/// Base64 inline payload used for image requests and responses.
///
/// Only `data` is required when decoding; a part without `mimeType` still
/// counts as an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SafetyRating {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub probability: String,
}

impl GenerateContentResponse {
    /// First inline payload of the first candidate.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| {
                content.parts.iter().find_map(|p| match p {
                    Part::InlineData { inline_data } => Some(inline_data),
                    _ => None,
                })
            })
    }

    /// Safety ratings from the first candidate followed by the prompt feedback.
    pub fn safety_ratings(&self) -> Vec<&SafetyRating> {
        self.candidates
            .first()
            .into_iter()
            .flat_map(|c| c.safety_ratings.iter())
            .chain(
                self.prompt_feedback
                    .iter()
                    .flat_map(|feedback| feedback.safety_ratings.iter()),
            )
            .collect()
    }

    /// Why the model stopped without an image, when it says so.
    pub fn stop_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
            .or_else(|| {
                self.candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .filter(|reason| *reason != "STOP")
            })
    }
}

/// Renders ratings as `CATEGORY (PROBABILITY), CATEGORY (PROBABILITY)`.
pub fn summarize_safety(ratings: &[&SafetyRating]) -> Option<String> {
    if ratings.is_empty() {
        return None;
    }
    Some(
        ratings
            .iter()
            .map(|r| format!("{} ({})", r.category, r.probability))
            .collect::<Vec<_>>()
            .join(", "),
    )
}
