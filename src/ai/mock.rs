use super::ImageEditService;
use crate::models::EncodedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockResponse {
    Image(Vec<u8>),
    NoImage(Option<String>),
    Failure(String),
}

/// Records every call and replays queued responses in a cycle.
#[derive(Clone)]
pub struct MockImageEditClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    calls: Arc<Mutex<Vec<(String, Vec<EncodedImage>)>>>,
}

impl MockImageEditClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, response: Vec<u8>) -> Self {
        self.push(MockResponse::Image(response))
    }

    pub fn with_no_image(self, safety: Option<String>) -> Self {
        self.push(MockResponse::NoImage(safety))
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(MockResponse::Failure(message.into()))
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Prompt and images of every call so far, oldest first.
    pub fn get_calls(&self) -> Vec<(String, Vec<EncodedImage>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockImageEditClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageEditService for MockImageEditClient {
    async fn generate_edited_image(
        &self,
        prompt: &str,
        images: &[EncodedImage],
    ) -> Result<Vec<u8>> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((prompt.to_string(), images.to_vec()));
            calls.len()
        };

        if images.is_empty() {
            return Err(Error::InvalidRequest(
                "at least one reference image is required".to_string(),
            ));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // PNG signature only
            return Ok(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        }

        match &responses[(count - 1) % responses.len()] {
            MockResponse::Image(data) => Ok(data.clone()),
            MockResponse::NoImage(safety) => Err(Error::NoImageProduced {
                reason: None,
                safety: safety.clone(),
            }),
            MockResponse::Failure(message) => Err(Error::Generation(message.clone())),
        }
    }
}
