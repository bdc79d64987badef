//! Configuration management for Tinta Server

use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub vision: VisionConfig,
    pub detector: DetectorConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Vision-language OCR model served over an Ollama-compatible API.
#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    pub base_url: String,
    pub model: String,
}

/// Local text detector (tesseract binary).
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorConfig {
    /// Recognition languages, tried together (tesseract `-l a+b` syntax).
    pub languages: Vec<String>,
}

/// Remote image-generation provider.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub steps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            vision: VisionConfig {
                base_url: "http://localhost:11434".to_string(),
                model: "llava".to_string(),
            },
            detector: DetectorConfig {
                languages: vec!["spa".to_string(), "eng".to_string()],
            },
            generation: GenerationConfig {
                base_url: "https://api.together.xyz".to_string(),
                api_key: String::new(),
                model: "black-forest-labs/FLUX.1-schnell".to_string(),
                steps: 4,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .unwrap_or(5000),
            },
            vision: VisionConfig {
                base_url: env::var("VISION_OCR_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("VISION_OCR_MODEL").unwrap_or_else(|_| "llava".to_string()),
            },
            detector: DetectorConfig {
                languages: env::var("OCR_LANGUAGES")
                    .unwrap_or_else(|_| "spa,eng".to_string())
                    .split(',')
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .collect(),
            },
            generation: GenerationConfig {
                base_url: env::var("IMAGE_API_URL")
                    .unwrap_or_else(|_| "https://api.together.xyz".to_string()),
                api_key: env::var("IMAGE_API_KEY")?,
                model: env::var("IMAGE_MODEL")
                    .unwrap_or_else(|_| "black-forest-labs/FLUX.1-schnell".to_string()),
                steps: env::var("IMAGE_STEPS")
                    .unwrap_or_else(|_| "4".to_string())
                    .parse()
                    .unwrap_or(4),
            },
        })
    }
}
