use super::client::GeminiHttpClient;
use super::types::{summarize_safety, Content, GenerateContentResponse, Part};
use crate::ai::ImageEditService;
use crate::models::{Config, EncodedImage};
use crate::prompts::PromptStyle;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct EditRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: EditGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditGenerationConfig {
    response_modalities: Vec<String>,
}

impl EditRequest {
    /// Reference images first, in caller order, then the instruction text.
    fn new(instruction: String, images: &[EncodedImage]) -> Result<Self> {
        if images.is_empty() {
            return Err(Error::InvalidRequest(
                "at least one reference image is required".to_string(),
            ));
        }

        let parts = images
            .iter()
            .map(Part::from)
            .chain(std::iter::once(Part::text(instruction)))
            .collect();

        Ok(Self {
            contents: vec![Content { role: None, parts }],
            generation_config: EditGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        })
    }
}

/// Places the people from reference photos into a described scene using a
/// Gemini image model.
pub struct GeminiEditClient {
    http: GeminiHttpClient,
    prompt_style: PromptStyle,
}

impl GeminiEditClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(crate::models::DEFAULT_TIMEOUT_SECS),
                client,
            ),
            prompt_style: PromptStyle::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            http: GeminiHttpClient::new(
                config.gemini_api_key.clone(),
                config.image_model.clone(),
                config.request_timeout,
            )
            .with_base_url(config.base_url.clone()),
            prompt_style: config.prompt_style,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_prompt_style(mut self, prompt_style: PromptStyle) -> Self {
        self.prompt_style = prompt_style;
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn extract_image(response: &GenerateContentResponse) -> Result<Vec<u8>> {
        let Some(inline_data) = response.first_inline_data() else {
            let err = Error::NoImageProduced {
                reason: response.stop_reason().map(str::to_string),
                safety: summarize_safety(&response.safety_ratings()),
            };
            tracing::warn!("{}", err);
            return Err(err);
        };

        tracing::debug!(
            "Gemini returned image with mime_type: {}",
            inline_data.mime_type
        );

        base64::engine::general_purpose::STANDARD
            .decode(&inline_data.data)
            .map_err(|e| Error::Generation(format!("Failed to decode Gemini base64 image: {}", e)))
    }
}

#[async_trait]
impl ImageEditService for GeminiEditClient {
    async fn generate_edited_image(
        &self,
        prompt: &str,
        images: &[EncodedImage],
    ) -> Result<Vec<u8>> {
        let request = EditRequest::new(self.prompt_style.instruction(prompt), images)?;

        tracing::info!(
            "Requesting scene from {} with {} reference image(s), prompt style {}",
            self.model(),
            images.len(),
            self.prompt_style.as_str()
        );

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;
        Self::extract_image(&response)
    }
}
