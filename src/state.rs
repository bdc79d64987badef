//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::generation::ImageGenerator;
use crate::ocr::OcrEngine;

/// Shared application state
///
/// Holds the OCR engines and the generation client, constructed once at
/// startup and shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    vision_engine: Arc<dyn OcrEngine>,
    detector_engine: Arc<dyn OcrEngine>,
    generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        config: Config,
        vision_engine: Arc<dyn OcrEngine>,
        detector_engine: Arc<dyn OcrEngine>,
        generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                vision_engine,
                detector_engine,
                generator,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the vision-language OCR engine
    pub fn vision_engine(&self) -> &Arc<dyn OcrEngine> {
        &self.inner.vision_engine
    }

    /// Get the text-detector OCR engine
    pub fn detector_engine(&self) -> &Arc<dyn OcrEngine> {
        &self.inner.detector_engine
    }

    /// Get the image-generation client
    pub fn generator(&self) -> &Arc<dyn ImageGenerator> {
        &self.inner.generator
    }
}
