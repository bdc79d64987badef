//! OCR endpoints
//!
//! Both routes run the same save/recognize/respond sequence, parametrized
//! over the engine pulled from state:
//! - POST /ocr - vision-language model backend
//! - POST /easyocr - multi-language text-detector backend

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::error::ErrorResponse;
use crate::ocr::{OcrEngine, OcrError, ScratchImage};
use crate::state::AppState;

/// Response for a successful recognition
#[derive(Serialize)]
pub struct OcrResponse {
    pub text: String,
}

impl IntoResponse for OcrError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Create the OCR router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ocr", post(recognize_vision))
        .route("/easyocr", post(recognize_detector))
        // Phone camera output; 20MB covers the largest uploads seen so far
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}

async fn recognize_vision(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResponse>, OcrError> {
    recognize(state.vision_engine().clone(), multipart).await
}

async fn recognize_detector(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResponse>, OcrError> {
    recognize(state.detector_engine().clone(), multipart).await
}

/// Shared handler body for both backends.
///
/// The scratch guard owns the temporary file, so the upload is removed on
/// every exit path, recognition failures included.
async fn recognize(
    engine: Arc<dyn OcrEngine>,
    mut multipart: Multipart,
) -> Result<Json<OcrResponse>, OcrError> {
    let data = read_image_field(&mut multipart).await?;
    tracing::debug!(engine = engine.name(), bytes = data.len(), "image received");

    let scratch = ScratchImage::write(&data).await?;

    let text = engine.recognize(scratch.path()).await.map_err(|e| {
        tracing::error!(engine = engine.name(), "recognition failed: {}", e);
        e
    })?;

    tracing::debug!(engine = engine.name(), chars = text.len(), "recognition complete");
    Ok(Json(OcrResponse { text }))
}

/// Pull the `image` field out of the multipart form.
async fn read_image_field(multipart: &mut Multipart) -> Result<Vec<u8>, OcrError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| OcrError::InvalidUpload(e.to_string()))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| OcrError::InvalidUpload(e.to_string()))?;
            return Ok(data.to_vec());
        }
    }

    tracing::warn!("no image field found in multipart upload");
    Err(OcrError::MissingImage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::config::Config;
    use crate::generation::MockGenerator;
    use crate::ocr::MockEngine;

    const BOUNDARY: &str = "tinta-test-boundary";

    fn app(vision: MockEngine, detector: MockEngine) -> Router {
        let state = AppState::new(
            Config::default(),
            Arc::new(vision),
            Arc::new(detector),
            Arc::new(MockGenerator::Fail("generator unused".to_string())),
        );
        router().with_state(state)
    }

    fn multipart_body(field_name: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
                 filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, field_name: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field_name, b"fake image bytes")))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn ocr_returns_recognized_text() {
        let app = app(
            MockEngine::Text("Hola Mundo".to_string()),
            MockEngine::Fail("wrong engine".to_string()),
        );

        let response = app.oneshot(multipart_request("/ocr", "image")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "text": "Hola Mundo" })
        );
    }

    #[tokio::test]
    async fn easyocr_uses_the_detector_engine() {
        let app = app(
            MockEngine::Fail("wrong engine".to_string()),
            MockEngine::Text("detected".to_string()),
        );

        let response = app
            .oneshot(multipart_request("/easyocr", "image"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "text": "detected" })
        );
    }

    #[tokio::test]
    async fn missing_image_field_is_a_client_error() {
        let app = app(
            MockEngine::Text("unreached".to_string()),
            MockEngine::Text("unreached".to_string()),
        );

        let response = app.oneshot(multipart_request("/ocr", "file")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "No image provided" })
        );
    }

    #[tokio::test]
    async fn engine_failure_maps_to_server_error_with_message() {
        let app = app(
            MockEngine::Fail("model exploded".to_string()),
            MockEngine::Text("unreached".to_string()),
        );

        let response = app.oneshot(multipart_request("/ocr", "image")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("model exploded"), "body was {}", message);
    }

    #[tokio::test]
    async fn failures_are_repeatable() {
        let state = AppState::new(
            Config::default(),
            Arc::new(MockEngine::Fail("model exploded".to_string())),
            Arc::new(MockEngine::Text("unreached".to_string())),
            Arc::new(MockGenerator::Fail("generator unused".to_string())),
        );

        for _ in 0..2 {
            let app = router().with_state(state.clone());
            let response = app.oneshot(multipart_request("/ocr", "image")).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = body_json(response).await;
            assert!(body["error"].as_str().unwrap().contains("model exploded"));
        }
    }
}
