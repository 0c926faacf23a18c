//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. Every
//! failure path of the upload → submit → result flow maps onto exactly one
//! variant, so callers match on kind instead of inspecting message text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read image '{filename}': {source}")]
    Read {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the media type of '{0}'")]
    MissingMediaType(String),

    #[error("Unsupported media type '{media_type}' for '{filename}' (expected JPEG, PNG or WEBP)")]
    UnsupportedMediaType { filename: String, media_type: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{}", describe_missing_image(.reason, .safety))]
    NoImageProduced {
        reason: Option<String>,
        safety: Option<String>,
    },

    #[error("Image generation failed: {0}")]
    Generation(String),

    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn describe_missing_image(reason: &Option<String>, safety: &Option<String>) -> String {
    let mut message = String::from("No image was generated");
    if let Some(reason) = reason {
        message.push_str(&format!(" (reason: {})", reason));
    }
    message.push('.');
    if let Some(safety) = safety {
        message.push_str(&format!(
            " The request may have been blocked by safety filters: {}",
            safety
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_image_message_without_details() {
        let err = Error::NoImageProduced {
            reason: None,
            safety: None,
        };
        assert_eq!(err.to_string(), "No image was generated.");
    }

    #[test]
    fn test_no_image_message_with_safety_and_reason() {
        let err = Error::NoImageProduced {
            reason: Some("SAFETY".to_string()),
            safety: Some("VIOLENCE (LOW)".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("No image was generated (reason: SAFETY)."));
        assert!(msg.contains("VIOLENCE (LOW)"));
    }

    #[test]
    fn test_read_error_names_file() {
        let err = Error::Read {
            filename: "me.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("me.png"));
        assert!(err.to_string().contains("gone"));
    }
}
