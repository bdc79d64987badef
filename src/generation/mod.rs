//! Image Generation Module
//!
//! Forwards text prompts to a remote generation provider and hands back the
//! URL of the produced image. The provider speaks a Together-style API:
//! bearer-authenticated `POST /v1/images/generations` returning a list of
//! result URLs.

mod client;
mod types;

pub use client::{GenerationClient, ImageGenerator};
pub use types::{GeneratedImage, GenerationError, GenerationResponse};

#[cfg(test)]
pub use client::MockGenerator;
