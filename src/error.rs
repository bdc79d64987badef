//! Error response body shared by all routes

use serde::Serialize;

/// JSON body returned on every failure: `{"error": <message>}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
