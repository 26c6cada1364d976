//! Route definitions for the `/editor` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// Routes mounted at `/editor`.
///
/// ```text
/// GET    /{template_id}   -> open
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{template_id}", get(editor::open))
}
