//! Inline image decoder.
//!
//! The canvas editor posts its preview as a data URI
//! (`data:image/png;base64,iVBOR...`). This module turns that string into
//! raw bytes plus a derived filename ready for the asset store.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CoreError;
use crate::naming::asset_filename;

/// Separator between the media type and the payload.
pub const BASE64_DELIMITER: &str = ";base64,";

/// Optional scheme prefix in front of the media type.
const DATA_SCHEME: &str = "data:";

/// A decoded inline image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    /// File extension taken from the media subtype (`image/png` -> `png`).
    pub extension: String,
    /// `{sanitized base}_{random}.{extension}`.
    pub filename: String,
}

/// Decode `data:<mime>;base64,<payload>` into bytes and a filename derived
/// from `suggested_base_name`.
///
/// Fails with [`CoreError::MalformedInput`] when the `;base64,` delimiter is
/// missing, the media type has no usable subtype, or the payload is not
/// valid (non-empty) base64. ASCII whitespace inside the payload is ignored.
pub fn decode(data_uri: &str, suggested_base_name: &str) -> Result<DecodedImage, CoreError> {
    let (media_type, payload) = data_uri.split_once(BASE64_DELIMITER).ok_or_else(|| {
        CoreError::MalformedInput(format!(
            "Image data must have the form data:<mime>{BASE64_DELIMITER}<payload>"
        ))
    })?;

    let extension = extension_from_media_type(media_type)?;

    // MIME encoders wrap base64 at 76 columns; line breaks carry no data.
    let payload: String = payload.split_ascii_whitespace().collect();
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| CoreError::MalformedInput(format!("Invalid base64 image payload: {e}")))?;
    if bytes.is_empty() {
        return Err(CoreError::MalformedInput(
            "Image payload is empty".to_string(),
        ));
    }

    let filename = asset_filename(suggested_base_name, &extension);

    Ok(DecodedImage {
        bytes,
        extension,
        filename,
    })
}

/// Extract the subtype after the final `/` of a media type.
///
/// Structured-syntax suffixes are dropped (`image/svg+xml` -> `svg`).
fn extension_from_media_type(media_type: &str) -> Result<String, CoreError> {
    let media_type = media_type
        .trim()
        .strip_prefix(DATA_SCHEME)
        .unwrap_or(media_type.trim());

    let subtype = media_type
        .rsplit_once('/')
        .map(|(_, sub)| sub)
        .ok_or_else(|| {
            CoreError::MalformedInput(format!("Media type '{media_type}' has no subtype"))
        })?;

    let subtype = subtype.split('+').next().unwrap_or_default();
    let valid = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if !valid {
        return Err(CoreError::MalformedInput(format!(
            "Media type '{media_type}' has an unusable subtype"
        )));
    }

    Ok(subtype.to_ascii_lowercase())
}
