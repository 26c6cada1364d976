//! Handlers for the `/designs` resource.
//!
//! Save, load and delete keep the editor's flat `{success, ...}` contracts;
//! failures use the shared error envelope.

use axum::extract::State;
use axum::Json;
use studio_core::design::{SaveDesignBody, SaveDesignRequest};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery, IdPath};
use crate::middleware::auth::AuthUser;
use crate::query::IncludeOrphanedParams;
use crate::response::{
    DataResponse, DesignSummary, LoadDesignResponse, MessageResponse, SaveDesignResponse,
};
use crate::state::AppState;

/// POST /api/v1/designs
///
/// Creates a design, or overwrites one when `design_id` is set. The body is
/// fully validated before anything is stored.
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<SaveDesignBody>,
) -> AppResult<Json<SaveDesignResponse>> {
    let request = SaveDesignRequest::try_from(body)?;
    let design = state.designs().save(&user.actor(), request).await?;

    Ok(Json(SaveDesignResponse {
        success: true,
        design_id: design.id,
        message: "Design saved successfully!",
    }))
}

/// GET /api/v1/designs[?include_orphaned=true]
///
/// Newest-updated first. Designs whose template was deleted are listed only
/// with `include_orphaned=true`.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(params): ApiQuery<IncludeOrphanedParams>,
) -> AppResult<Json<DataResponse<Vec<DesignSummary>>>> {
    let designs = state
        .designs()
        .list_for(&user.actor(), !params.include_orphaned)
        .await?;

    let assets = state.assets.as_ref();
    Ok(Json(DataResponse {
        data: designs
            .into_iter()
            .map(|d| DesignSummary::new(d, assets))
            .collect(),
    }))
}

/// GET /api/v1/designs/{id}
pub async fn load(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<LoadDesignResponse>> {
    let design = state.designs().get(&user.actor(), id).await?;

    Ok(Json(LoadDesignResponse {
        success: true,
        canvas_data: design.canvas_data,
        design_name: design.design_name,
        template_id: design.template_id,
    }))
}

/// DELETE /api/v1/designs/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    state.designs().delete(&user.actor(), id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Design deleted successfully!",
    }))
}
