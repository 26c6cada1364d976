//! Route definitions for the `/designs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::designs;
use crate::state::AppState;

/// Routes mounted at `/designs`.
///
/// ```text
/// GET    /       -> list  (?include_orphaned=true)
/// POST   /       -> save
/// GET    /{id}   -> load
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(designs::list).post(designs::save))
        .route("/{id}", get(designs::load).delete(designs::delete))
}
