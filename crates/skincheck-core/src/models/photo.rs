//! Captured photo model

use std::fmt;

use serde::{Deserialize, Serialize};

const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Where a photo should come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Library,
    Camera,
}

/// A photo returned by the photo source collaborator.
///
/// The bytes are never inspected by the analysis; they are only displayed and,
/// on the promotion screen, attached to the outgoing mail.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    bytes: Vec<u8>,
    mime_type: String,
}

impl CapturedImage {
    /// Wrap raw bytes, sniffing the MIME type from the content.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime_type = image::guess_format(&bytes).map_or_else(
            |_| UNKNOWN_MIME_TYPE.to_string(),
            |format| format.to_mime_type().to_string(),
        );
        Self { bytes, mime_type }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the content was recognised as a decodable image format.
    #[must_use]
    pub fn is_recognized_image(&self) -> bool {
        self.mime_type != UNKNOWN_MIME_TYPE
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CapturedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn from_bytes_sniffs_png() {
        let image = CapturedImage::from_bytes(PNG_SIGNATURE.to_vec());
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.is_recognized_image());
    }

    #[test]
    fn from_bytes_falls_back_for_unknown_content() {
        let image = CapturedImage::from_bytes(b"not an image".to_vec());
        assert_eq!(image.mime_type(), UNKNOWN_MIME_TYPE);
        assert!(!image.is_recognized_image());
    }

    #[test]
    fn debug_hides_bytes() {
        let image = CapturedImage::from_bytes(vec![1, 2, 3]);
        let rendered = format!("{image:?}");
        assert!(rendered.contains("len: 3"));
        assert!(!rendered.contains("[1, 2, 3]"));
    }
}
