//! OCR types

/// Axis-aligned box in pixel coordinates, as reported by the detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// One detected text fragment.
///
/// The response boundary keeps only `text`; bounds and confidence exist so
/// callers that need layout can get at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bounds: BoundingBox,
    pub text: String,
    pub confidence: f64,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("No image provided")]
    MissingImage,

    #[error("Failed to read upload: {0}")]
    InvalidUpload(String),

    #[error("Failed to save image: {0}")]
    SaveFailed(String),

    #[error("Failed to process image: {0}")]
    ProcessingError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

impl OcrError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::MissingImage | Self::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
