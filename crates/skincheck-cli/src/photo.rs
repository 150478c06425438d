//! Photo source backed by the filesystem.

use std::path::PathBuf;

use skincheck_core::flow::PhotoSource;
use skincheck_core::{CapturedImage, ImageSource};

/// "Library" reads the configured file; a terminal has no camera, so camera
/// capture behaves like the user cancelling.
#[derive(Debug, Clone)]
pub struct FilePhotoSource {
    path: PathBuf,
}

impl FilePhotoSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PhotoSource for FilePhotoSource {
    async fn capture(&self, source: ImageSource) -> Option<CapturedImage> {
        if source == ImageSource::Camera {
            tracing::info!("Camera capture is not available in a terminal");
            return None;
        }

        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => {
                tracing::warn!("Photo {} is empty", self.path.display());
                None
            }
            Ok(bytes) => {
                let image = CapturedImage::from_bytes(bytes);
                if !image.is_recognized_image() {
                    tracing::warn!(
                        "Photo {} is not a recognised image format",
                        self.path.display()
                    );
                }
                Some(image)
            }
            Err(error) => {
                tracing::warn!("Failed to read photo {}: {}", self.path.display(), error);
                None
            }
        }
    }
}
