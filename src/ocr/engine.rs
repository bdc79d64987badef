//! OCR Engines
//!
//! The capability trait and the two backend implementations.

use std::path::Path;

use async_trait::async_trait;

use super::types::{BoundingBox, Detection, OcrError};

/// Capability interface shared by every OCR backend.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name used in logs.
    fn name(&self) -> &'static str;

    /// Extract text from the image at `image_path`.
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError>;
}

/// Vision-language model queried over an Ollama-compatible API.
pub struct VisionModelEngine {
    base_url: String,
    /// Model name (e.g., "llava", "bakllava")
    model: String,
    client: reqwest::Client,
}

/// Instruction sent alongside the image; the model's reply is the OCR text.
const OCR_PROMPT: &str =
    "Extract all text from this image exactly as written. Return only the extracted text, nothing else.";

impl VisionModelEngine {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl OcrEngine for VisionModelEngine {
    fn name(&self) -> &'static str {
        "vision"
    }

    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        use base64::Engine;

        let image_data = tokio::fs::read(image_path)
            .await
            .map_err(|e| OcrError::ProcessingError(format!("Failed to read image: {}", e)))?;

        let image_base64 = base64::engine::general_purpose::STANDARD.encode(&image_data);

        let request = serde_json::json!({
            "model": self.model,
            "prompt": OCR_PROMPT,
            "images": [image_base64],
            "stream": false
        });

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to call vision model: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::ApiError(format!(
                "Vision model returned {}: {}",
                status, body
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OcrError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(result["response"].as_str().unwrap_or("").trim().to_string())
    }
}

/// Multi-language text detector backed by the local `tesseract` binary.
///
/// Runs in TSV mode so each detected word carries its bounding box and
/// confidence; recognition flattens those fragments into a single string.
pub struct DetectorEngine {
    /// Languages joined with '+' (tesseract `-l` syntax).
    languages: String,
}

impl DetectorEngine {
    pub fn new(languages: &[String]) -> Self {
        Self {
            languages: languages.join("+"),
        }
    }

    fn detect(&self, image_path: &Path) -> Result<Vec<Detection>, OcrError> {
        use std::process::Command;

        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3")
            .arg("tsv")
            .output()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr
            )));
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse tesseract TSV output into word-level detections.
///
/// Columns: level page block par line word left top width height conf text.
/// Words are level-5 rows; layout rows carry conf -1 and are skipped.
fn parse_tsv(tsv: &str) -> Vec<Detection> {
    tsv.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 12 || cols[0] != "5" {
                return None;
            }

            let confidence: f64 = cols[10].parse().ok()?;
            if confidence < 0.0 {
                return None;
            }

            let text = cols[11].trim();
            if text.is_empty() {
                return None;
            }

            Some(Detection {
                bounds: BoundingBox {
                    left: cols[6].parse().ok()?,
                    top: cols[7].parse().ok()?,
                    width: cols[8].parse().ok()?,
                    height: cols[9].parse().ok()?,
                },
                text: text.to_string(),
                confidence,
            })
        })
        .collect()
}

/// Join detected fragments in reading order, discarding layout metadata.
fn join_fragments(detections: &[Detection]) -> String {
    detections
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl OcrEngine for DetectorEngine {
    fn name(&self) -> &'static str {
        "detector"
    }

    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        if !image_path.exists() {
            return Err(OcrError::ProcessingError(format!(
                "image file not found: {}",
                image_path.display()
            )));
        }

        let detections = self.detect(image_path)?;
        tracing::debug!(
            languages = %self.languages,
            fragments = detections.len(),
            "detection complete"
        );

        Ok(join_fragments(&detections))
    }
}

/// Mock engine for route tests
#[cfg(test)]
pub enum MockEngine {
    Text(String),
    Fail(String),
}

#[cfg(test)]
#[async_trait]
impl OcrEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn recognize(&self, _image_path: &Path) -> Result<String, OcrError> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Fail(message) => Err(OcrError::ProcessingError(message.clone())),
        }
    }
}
