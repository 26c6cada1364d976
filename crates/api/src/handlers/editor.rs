//! Handler for opening the canvas editor on a template.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::IdPath;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, ImageView, TemplateView};
use crate::state::AppState;

/// Everything the editor needs to start.
#[derive(Debug, Serialize)]
pub struct EditorView {
    pub template: TemplateView,
    /// The user's image pool, newest first.
    pub user_images: Vec<ImageView>,
}

/// GET /api/v1/editor/{template_id}
pub async fn open(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(template_id): IdPath,
) -> AppResult<Json<DataResponse<EditorView>>> {
    let template = state.templates().get(template_id).await?;
    let images = state.user_images().list(&user.actor()).await?;

    let assets = state.assets.as_ref();
    Ok(Json(DataResponse {
        data: EditorView {
            template: TemplateView::new(template, assets),
            user_images: images.into_iter().map(|i| ImageView::new(i, assets)).collect(),
        },
    }))
}
