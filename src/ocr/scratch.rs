//! Request-scoped temporary image files
//!
//! Each upload gets its own path under the system temp directory; the
//! guard removes the file when dropped, on success and failure paths
//! alike.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::types::OcrError;

/// Owns a temporary image file for the duration of one request.
pub struct ScratchImage {
    path: PathBuf,
}

impl ScratchImage {
    /// Write uploaded bytes to a fresh path under the system temp dir.
    pub async fn write(data: &[u8]) -> Result<Self, OcrError> {
        let path = std::env::temp_dir().join(format!("ocr_upload_{}.jpg", Uuid::new_v4()));

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| OcrError::SaveFailed(e.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "image saved");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchImage {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_creates_unique_files() {
        let a = ScratchImage::write(b"first").await.unwrap();
        let b = ScratchImage::write(b"second").await.unwrap();

        assert_ne!(a.path(), b.path());
        assert_eq!(std::fs::read(a.path()).unwrap(), b"first");
        assert_eq!(std::fs::read(b.path()).unwrap(), b"second");
    }

    #[tokio::test]
    async fn drop_removes_file() {
        let scratch = ScratchImage::write(b"ephemeral").await.unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.exists());

        drop(scratch);
        assert!(!path.exists());
    }
}
