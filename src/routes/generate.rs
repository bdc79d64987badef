//! Image generation endpoint
//!
//! - POST /generate_image - forward a text prompt to the remote provider

use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;
use crate::generation::GenerationError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub image_url: String,
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Create the generation router
pub fn router() -> Router<AppState> {
    Router::new().route("/generate_image", post(generate_image))
}

async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, GenerationError> {
    // Presence and non-emptiness are the only prompt validation
    let prompt = request
        .prompt
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(GenerationError::MissingPrompt)?;

    tracing::debug!(chars = prompt.len(), "generation prompt received");

    let image_url = state.generator().generate(prompt).await.map_err(|e| {
        tracing::error!("image generation failed: {}", e);
        e
    })?;

    tracing::info!(%image_url, "image generated");
    Ok(Json(GenerateResponse { image_url }))
}
