//! Handlers for the `/images` resource (the editor's upload pool).

use axum::extract::{Multipart, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, ImageView, UploadImageResponse};
use crate::state::AppState;

/// POST /api/v1/images
///
/// Multipart form with an `image` file field.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadImageResponse>> {
    let mut image: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            image = Some((filename, data.to_vec()));
        }
    }

    let (filename, bytes) = image
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("No image provided".into()))?;

    let uploaded = state
        .user_images()
        .upload(&user.actor(), &bytes, filename.as_deref())
        .await?;

    Ok(Json(UploadImageResponse {
        success: true,
        image_url: state.assets.url(&uploaded.image_key),
        image_id: uploaded.id,
    }))
}

/// GET /api/v1/images
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ImageView>>>> {
    let images = state.user_images().list(&user.actor()).await?;
    let assets = state.assets.as_ref();
    Ok(Json(DataResponse {
        data: images.into_iter().map(|i| ImageView::new(i, assets)).collect(),
    }))
}
