pub mod categories;
pub mod designs;
pub mod editor;
pub mod health;
pub mod images;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                      list non-empty categories
///
/// /templates                       list (?category=ID), upload (multipart)
/// /templates/{id}                  get, delete (uploader only)
///
/// /editor/{template_id}            template + the user's image pool
///
/// /images                          list, upload (multipart)
///
/// /designs                         list (?include_orphaned=true), save
/// /designs/{id}                    load, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/templates", templates::router())
        .nest("/editor", editor::router())
        .nest("/images", images::router())
        .nest("/designs", designs::router())
}
