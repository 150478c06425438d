//! Picked-photo handling and in-app previews.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use base64::prelude::{Engine as _, BASE64_STANDARD};
use skincheck_core::{CapturedImage, ImageSource, PhotoSource};

pub const MAX_PREVIEW_BYTES: usize = 8 * 1024 * 1024;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum PhotoPreview {
    #[default]
    None,
    DataUri(String),
    TooLarge,
}

/// Why a picked file was not accepted as a photo.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PickRejection {
    Empty,
    NotAnImage,
}

impl PickRejection {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Empty => "The selected file is empty.",
            Self::NotAnImage => "Please choose an image file.",
        }
    }
}

/// Turn the bytes of a picked file into a photo.
///
/// The file is accepted when either its declared type, its extension or its
/// content says it is an image.
pub fn picked_photo(
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<CapturedImage, PickRejection> {
    if bytes.is_empty() {
        return Err(PickRejection::Empty);
    }

    let declared_image = content_type
        .map(str::trim)
        .is_some_and(|value| value.to_ascii_lowercase().starts_with("image/"));
    let named_image = mime_guess::from_path(file_name)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE);

    let image = CapturedImage::from_bytes(bytes);
    if image.is_recognized_image() || declared_image || named_image {
        Ok(image)
    } else {
        Err(PickRejection::NotAnImage)
    }
}

#[must_use]
pub fn photo_preview(image: Option<&CapturedImage>) -> PhotoPreview {
    let Some(image) = image else {
        return PhotoPreview::None;
    };
    if image.len() > MAX_PREVIEW_BYTES {
        return PhotoPreview::TooLarge;
    }

    let mime_type = if image.is_recognized_image() {
        image.mime_type()
    } else {
        "image/jpeg"
    };
    let encoded = BASE64_STANDARD.encode(image.bytes());
    PhotoPreview::DataUri(format!("data:{mime_type};base64,{encoded}"))
}

/// A photo the UI already picked, handed to flows that ask a photo source.
#[derive(Debug, Clone, Default)]
pub struct PickedPhoto(pub Option<CapturedImage>);

impl PhotoSource for PickedPhoto {
    async fn capture(&self, _source: ImageSource) -> Option<CapturedImage> {
        self.0.clone()
    }
}
