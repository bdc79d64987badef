//! Image generation types

use serde::{Deserialize, Serialize};

/// Request body for the provider's generation endpoint.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub steps: u32,
    /// Number of images to generate; the service only ever asks for one.
    pub n: u32,
}

/// Provider response: the list of generated images.
#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub data: Vec<GeneratedImage>,
}

/// A single generated image reference.
#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

/// Image generation error types
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No prompt provided")]
    MissingPrompt,

    #[error("Image API error: {0}")]
    ApiError(String),

    #[error("Provider returned no images")]
    EmptyResult,
}

impl GenerationError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::MissingPrompt => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_response_deserializes_first_url() {
        let body = serde_json::json!({
            "id": "gen-1",
            "model": "black-forest-labs/FLUX.1-schnell",
            "data": [
                { "url": "https://example/img.png" },
                { "url": "https://example/img-2.png" }
            ]
        });

        let response: GenerationResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.data[0].url, "https://example/img.png");
    }

    #[test]
    fn empty_result_list_deserializes() {
        let response: GenerationResponse =
            serde_json::from_value(serde_json::json!({ "data": [] })).unwrap();
        assert!(response.data.is_empty());
    }
}
