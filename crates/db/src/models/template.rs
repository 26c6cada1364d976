//! Template model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::ownership::Owned;
use studio_core::types::{DbId, Timestamp};

/// A row from the `templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub name: String,
    /// Asset key of the base image (under `templates/`).
    pub image_key: String,
    pub category_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    /// Set from the uploader's privilege at upload time; never changes.
    pub is_admin_template: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Template {
    const ENTITY: &'static str = "Template";

    fn entity_id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> Option<DbId> {
        self.uploaded_by
    }
}

/// DTO for inserting a template. The uploader is passed separately.
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub name: String,
    pub image_key: String,
    pub category_id: Option<DbId>,
    pub is_admin_template: bool,
}
