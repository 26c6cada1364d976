//! Saved design model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::ownership::Owned;
use studio_core::types::{DbId, Timestamp};

/// A row from the `user_designs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Design {
    pub id: DbId,
    pub user_id: DbId,
    /// `None` once the base template has been deleted.
    pub template_id: Option<DbId>,
    pub design_name: String,
    /// The editor's canvas document, stored verbatim as JSONB.
    pub canvas_data: serde_json::Value,
    /// Asset key of the rendered preview (under `saved_designs/`).
    pub preview_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Design {
    const ENTITY: &'static str = "Design";

    fn entity_id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> Option<DbId> {
        Some(self.user_id)
    }
}

/// DTO for inserting a design. The owner is passed separately.
#[derive(Debug, Clone)]
pub struct CreateDesign {
    pub template_id: DbId,
    pub design_name: String,
    pub canvas_data: serde_json::Value,
    pub preview_key: Option<String>,
}

/// DTO for overwriting a design in place.
///
/// Owner and template are fixed at creation and deliberately absent here.
/// `preview_key: None` keeps the current preview.
#[derive(Debug, Clone)]
pub struct UpdateDesign {
    pub design_name: String,
    pub canvas_data: serde_json::Value,
    pub preview_key: Option<String>,
}
