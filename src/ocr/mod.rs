//! OCR Module
//!
//! Text recognition for uploaded images, delegated to pretrained backends:
//! - a vision-language model queried over an Ollama-compatible HTTP API
//! - a multi-language text detector (local tesseract binary, TSV mode)
//!
//! Both backends implement [`OcrEngine`], so the HTTP handlers share one
//! save/recognize/respond sequence. Uploaded bytes are handed to a backend
//! through a [`ScratchImage`], a request-scoped temporary file that is
//! removed when the guard drops.

mod engine;
mod scratch;
mod types;

pub use engine::{DetectorEngine, OcrEngine, VisionModelEngine};
pub use scratch::ScratchImage;
pub use types::{BoundingBox, Detection, OcrError};

#[cfg(test)]
pub use engine::MockEngine;
