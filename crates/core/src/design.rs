//! Design save requests and the in-memory draft they produce.
//!
//! A design moves through `absent -> draft -> persisted -> deleted`. This
//! module owns the first two steps: turning an untrusted JSON body into a
//! validated [`SaveDesignRequest`], then into a [`DesignDraft`] whose preview
//! image (if any) is already decoded. Nothing here touches storage, so every
//! validation or decoding failure surfaces before the first write.

use serde::Deserialize;
use validator::Validate;

use crate::data_uri::{self, DecodedImage};
use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::require_name;

/// Raw `save_design` body as posted by the editor.
///
/// Every field is optional at this stage so that missing fields become a
/// [`CoreError::Validation`] instead of a deserialization rejection. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveDesignBody {
    pub design_id: Option<DbId>,
    pub design_name: Option<String>,
    pub canvas_data: Option<serde_json::Value>,
    pub template_id: Option<DbId>,
    pub preview_image: Option<String>,
}

/// A validated `save_design` request.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SaveDesignRequest {
    /// `Some` updates an existing design, `None` creates a new one.
    #[validate(range(min = 1))]
    pub design_id: Option<DbId>,
    pub design_name: String,
    /// The canvas document, persisted verbatim.
    pub canvas_data: serde_json::Value,
    #[validate(range(min = 1))]
    pub template_id: DbId,
    // 20 MiB of base64 text.
    #[validate(length(min = 1, max = 20971520))]
    pub preview_image_data_uri: Option<String>,
}

impl TryFrom<SaveDesignBody> for SaveDesignRequest {
    type Error = CoreError;

    fn try_from(body: SaveDesignBody) -> Result<Self, Self::Error> {
        let design_name = require_name("design_name", body.design_name.as_deref())?;

        let canvas_data = body
            .canvas_data
            .ok_or_else(|| CoreError::Validation("canvas_data is required".to_string()))?;

        validate_canvas_document(&canvas_data)?;

        let template_id = body
            .template_id
            .ok_or_else(|| CoreError::Validation("template_id is required".to_string()))?;

        // An empty string is how the editor says "no preview".
        let preview_image_data_uri = body.preview_image.filter(|uri| !uri.trim().is_empty());

        let request = SaveDesignRequest {
            design_id: body.design_id,
            design_name,
            canvas_data,
            template_id,
            preview_image_data_uri,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Reject canvas documents the JSONB column cannot hold verbatim.
///
/// The document is otherwise opaque; only NUL characters (in keys or string
/// values) are refused, since PostgreSQL's JSONB type cannot store them.
pub fn validate_canvas_document(value: &serde_json::Value) -> Result<(), CoreError> {
    let mut stack = vec![value];
    while let Some(node) = stack.pop() {
        match node {
            serde_json::Value::String(s) if s.contains('\0') => {
                return Err(CoreError::Validation(
                    "canvas_data must not contain NUL characters".to_string(),
                ));
            }
            serde_json::Value::Array(items) => stack.extend(items),
            serde_json::Value::Object(map) => {
                if map.keys().any(|k| k.contains('\0')) {
                    return Err(CoreError::Validation(
                        "canvas_data must not contain NUL characters".to_string(),
                    ));
                }
                stack.extend(map.values());
            }
            _ => {}
        }
    }
    Ok(())
}

/// An unsaved design: validated fields plus the decoded preview image.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignDraft {
    pub design_id: Option<DbId>,
    pub template_id: DbId,
    pub name: String,
    pub canvas_data: serde_json::Value,
    pub preview: Option<DecodedImage>,
}

impl SaveDesignRequest {
    /// Decode the preview (named after the design) and produce a draft.
    ///
    /// A malformed preview is reported as [`CoreError::Validation`]: the
    /// whole save is rejected, not just the image.
    pub fn into_draft(self) -> Result<DesignDraft, CoreError> {
        let preview = self
            .preview_image_data_uri
            .as_deref()
            .map(|uri| data_uri::decode(uri, &self.design_name))
            .transpose()
            .map_err(CoreError::into_validation)?;

        Ok(DesignDraft {
            design_id: self.design_id,
            template_id: self.template_id,
            name: self.design_name,
            canvas_data: self.canvas_data,
            preview,
        })
    }
}
