//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::Json;
use studio_db::models::category::Category;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Categories that have at least one template, ordered by name.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = state.categories().list_nonempty().await?;
    Ok(Json(DataResponse { data: categories }))
}
