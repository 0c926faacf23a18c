//! AI service integration for scene generation
//!
//! Provides the image-editing interface used by the app and its Gemini-backed
//! implementation, which places the subjects of reference photos into a
//! described scene.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiEditClient;
pub use mock::MockImageEditClient;

use crate::models::EncodedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageEditService: Send + Sync {
    /// Sends every image plus the prompt in one request and returns the raw
    /// bytes of the first generated image.
    async fn generate_edited_image(&self, prompt: &str, images: &[EncodedImage])
        -> Result<Vec<u8>>;
}
