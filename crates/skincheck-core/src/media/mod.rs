//! Image re-encoding for mail attachments.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;

use crate::{Error, Result};

/// JPEG quality used for promotion attachments.
pub const ATTACHMENT_JPEG_QUALITY: u8 = 80;

/// Decode any supported image format and re-encode it as JPEG.
///
/// Alpha is dropped; JPEG has no transparency.
pub fn encode_jpeg_attachment(source_bytes: &[u8], quality: u8) -> Result<Vec<u8>> {
    if source_bytes.is_empty() {
        return Err(Error::InvalidInput(
            "Attachment source bytes cannot be empty".to_string(),
        ));
    }

    let source = image::load_from_memory(source_bytes)
        .map_err(|error| Error::Image(format!("Failed to decode attachment image: {error}")))?;
    let rgb = source.to_rgb8();

    let mut cursor = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut cursor, quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(|error| Error::Image(format!("Failed to encode JPEG attachment: {error}")))?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_fixture() -> Vec<u8> {
        let image = RgbaImage::from_fn(16, 12, |x, y| {
            Rgba([u8::try_from(x * 10).unwrap(), u8::try_from(y * 10).unwrap(), 128, 200])
        });
        let mut cursor = Cursor::new(Vec::new());
        image.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn png_is_reencoded_as_jpeg() {
        let jpeg = encode_jpeg_attachment(&png_fixture(), ATTACHMENT_JPEG_QUALITY).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 12));
    }

    #[test]
    fn empty_input_is_rejected() {
        let error = encode_jpeg_attachment(&[], ATTACHMENT_JPEG_QUALITY).unwrap_err();
        assert!(error.to_string().contains("cannot be empty"));
    }

    #[test]
    fn undecodable_input_is_rejected() {
        let error = encode_jpeg_attachment(b"plain text", ATTACHMENT_JPEG_QUALITY).unwrap_err();
        assert!(matches!(error, Error::Image(_)));
    }
}
