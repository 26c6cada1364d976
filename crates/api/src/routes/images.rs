//! Route definitions for the `/images` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> upload (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(images::list).post(images::upload))
}
