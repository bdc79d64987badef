//! Remote image-generation provider client

use async_trait::async_trait;

use crate::config::GenerationConfig;

use super::types::{GenerationError, GenerationRequest, GenerationResponse};

/// Capability interface for the image-generation backend.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for `prompt` and return its URL.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Together-style generation API client.
pub struct GenerationClient {
    base_url: String,
    api_key: String,
    model: String,
    steps: u32,
    client: reqwest::Client,
}

impl GenerationClient {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            steps: config.steps,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageGenerator for GenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerationRequest {
            model: &self.model,
            prompt,
            steps: self.steps,
            n: 1,
        };

        let url = format!("{}/v1/images/generations", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::ApiError(format!("Failed to call image API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiError(format!(
                "Image API returned {}: {}",
                status, body
            )));
        }

        let result: GenerationResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ApiError(format!("Failed to parse response: {}", e)))?;

        result
            .data
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or(GenerationError::EmptyResult)
    }
}

/// Mock generator for route tests
#[cfg(test)]
pub enum MockGenerator {
    Url(String),
    Fail(String),
}

#[cfg(test)]
#[async_trait]
impl ImageGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::Fail(message) => Err(GenerationError::ApiError(message.clone())),
        }
    }
}
