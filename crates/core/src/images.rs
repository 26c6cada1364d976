//! Uploaded image validation.
//!
//! Template images and editor uploads arrive as raw multipart bytes. They
//! are only accepted when the `image` crate can recognise the format and
//! fully decode the pixel data.

use std::io::Cursor;

use image::ImageReader;

use crate::error::CoreError;

/// Upper bound on decoded dimensions to keep a hostile upload from
/// allocating an enormous pixel buffer.
pub const MAX_IMAGE_DIMENSION: u32 = 16_384;

/// Basic facts about a validated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Canonical extension for the detected format (`png`, `jpg`, ...).
    pub extension: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Confirm `bytes` is a decodable image and describe it.
pub fn inspect_image(bytes: &[u8]) -> Result<ImageInfo, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Image file is empty".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::Validation(format!("Unreadable image: {e}")))?;

    let format = reader.format().ok_or_else(|| {
        CoreError::Validation("Upload is not a recognised image format".to_string())
    })?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CoreError::Validation(format!("Invalid image header: {e}")))?;
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CoreError::Validation(format!(
            "Image is {width}x{height}, exceeding the maximum of {MAX_IMAGE_DIMENSION} pixels per side"
        )));
    }

    // Header parsing alone accepts truncated files; decode the pixels too.
    ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| CoreError::Validation(format!("Image could not be decoded: {e}")))?;

    let extension = format.extensions_str().first().copied().unwrap_or("img");

    Ok(ImageInfo {
        extension,
        width,
        height,
    })
}
