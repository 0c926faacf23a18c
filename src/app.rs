//! Application orchestration for one scene generation.

use crate::ai::{GeminiEditClient, ImageEditService};
use crate::encoder::{self, ImageFile};
use crate::models::{Config, GeneratedImage};
use crate::session::Session;
use crate::Result;
use tracing::{info, warn};

/// Encodes the selected photos and hands them to the image editing service.
pub struct App {
    editor: Box<dyn ImageEditService>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        info!(
            "Image provider: Gemini (model: {}, prompt style: {})",
            config.image_model,
            config.prompt_style.as_str()
        );
        Self::with_service(Box::new(GeminiEditClient::from_config(config)))
    }

    /// Build an app around any editing service, typically a mock in tests.
    pub fn with_service(editor: Box<dyn ImageEditService>) -> Self {
        Self { editor }
    }

    pub async fn compose(&self, prompt: &str, files: &[ImageFile]) -> Result<GeneratedImage> {
        let images = encoder::encode_all(files).await?;
        let data = self.editor.generate_edited_image(prompt, &images).await?;
        info!("Generated image ({} bytes)", data.len());
        Ok(GeneratedImage::new(data))
    }

    /// Moves a session with a selection through `submitting` to `succeeded`
    /// or `failed`. Only an invalid starting state is returned as `Err`.
    pub async fn submit(&self, session: &Session) -> Result<Session> {
        let submitting = session.submit()?;
        info!(
            "Submitting {} image(s) with prompt: {}",
            submitting.images().len(),
            submitting.prompt()
        );

        match self.compose(submitting.prompt(), &submitting.files()).await {
            Ok(image) => submitting.succeed(image),
            Err(e) => {
                warn!("Scene generation failed: {}", e);
                submitting.fail(e)
            }
        }
    }
}
