//! Query parameter types for API handlers.

use serde::Deserialize;
use studio_core::types::DbId;

/// `GET /templates?category=ID`.
#[derive(Debug, Deserialize)]
pub struct TemplateListParams {
    pub category: Option<DbId>,
}

/// `GET /designs?include_orphaned=true` also lists designs whose template
/// was deleted.
#[derive(Debug, Deserialize)]
pub struct IncludeOrphanedParams {
    #[serde(default)]
    pub include_orphaned: bool,
}
