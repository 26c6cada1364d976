//! Shared response types for API handlers.
//!
//! Listing and lookup endpoints use the `{ "data": ... }` envelope
//! ([`DataResponse`]). The editor's save/load/upload calls keep their flat
//! `{ "success": true, ... }` contracts. Stored asset keys are never exposed;
//! views carry public URLs instead.

use serde::Serialize;
use studio_core::assets::AssetStore;
use studio_core::types::{DbId, Timestamp};
use studio_db::models::design::Design;
use studio_db::models::template::Template;
use studio_db::models::uploaded_image::UploadedImage;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `POST /designs` success body.
#[derive(Debug, Serialize)]
pub struct SaveDesignResponse {
    pub success: bool,
    pub design_id: DbId,
    pub message: &'static str,
}

/// `GET /designs/{id}` body, shaped for reopening the editor.
#[derive(Debug, Serialize)]
pub struct LoadDesignResponse {
    pub success: bool,
    pub canvas_data: serde_json::Value,
    pub design_name: String,
    pub template_id: Option<DbId>,
}

/// `POST /images` success body.
#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub success: bool,
    pub image_url: String,
    pub image_id: DbId,
}

/// Confirmation for deletions.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

/// A template as shown to clients.
#[derive(Debug, Serialize)]
pub struct TemplateView {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub category_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    pub is_admin_template: bool,
    pub created_at: Timestamp,
}

impl TemplateView {
    pub fn new(template: Template, assets: &dyn AssetStore) -> Self {
        Self {
            image_url: assets.url(&template.image_key),
            id: template.id,
            name: template.name,
            category_id: template.category_id,
            uploaded_by: template.uploaded_by,
            is_admin_template: template.is_admin_template,
            created_at: template.created_at,
        }
    }

    pub fn list(templates: Vec<Template>, assets: &dyn AssetStore) -> Vec<Self> {
        templates
            .into_iter()
            .map(|t| Self::new(t, assets))
            .collect()
    }
}

/// One row of the "my designs" listing. The canvas document is left out.
#[derive(Debug, Serialize)]
pub struct DesignSummary {
    pub id: DbId,
    pub design_name: String,
    pub template_id: Option<DbId>,
    pub preview_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DesignSummary {
    pub fn new(design: Design, assets: &dyn AssetStore) -> Self {
        Self {
            preview_url: design.preview_key.as_deref().map(|key| assets.url(key)),
            id: design.id,
            design_name: design.design_name,
            template_id: design.template_id,
            created_at: design.created_at,
            updated_at: design.updated_at,
        }
    }
}

/// An image from the editor's upload pool.
#[derive(Debug, Serialize)]
pub struct ImageView {
    pub id: DbId,
    pub image_url: String,
    pub uploaded_at: Timestamp,
}

impl ImageView {
    pub fn new(image: UploadedImage, assets: &dyn AssetStore) -> Self {
        Self {
            image_url: assets.url(&image.image_key),
            id: image.id,
            uploaded_at: image.uploaded_at,
        }
    }
}
