//! Handlers for the `/templates` resource.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use studio_core::category::CategorySelection;
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::category::Category;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, IdPath};
use crate::middleware::auth::AuthUser;
use crate::query::TemplateListParams;
use crate::response::{DataResponse, MessageResponse, TemplateView};
use crate::services::TemplateUpload;
use crate::state::AppState;

/// Body of the template listing.
#[derive(Debug, Serialize)]
pub struct TemplateListView {
    pub admin_templates: Vec<TemplateView>,
    pub user_templates: Vec<TemplateView>,
    /// Categories with at least one template, for the filter menu.
    pub categories: Vec<Category>,
    pub selected_category: Option<Category>,
}

/// GET /api/v1/templates[?category=ID]
///
/// Open to anonymous visitors; signed-in users also get their own uploads.
pub async fn list(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    ApiQuery(params): ApiQuery<TemplateListParams>,
) -> AppResult<Json<DataResponse<TemplateListView>>> {
    let actor = user.map(|u| u.actor());
    let listing = state
        .templates()
        .list_visible(actor.as_ref(), params.category)
        .await?;
    let categories = state.categories().list_nonempty().await?;

    let assets = state.assets.as_ref();
    Ok(Json(DataResponse {
        data: TemplateListView {
            admin_templates: TemplateView::list(listing.admin_templates, assets),
            user_templates: TemplateView::list(listing.user_templates, assets),
            categories,
            selected_category: listing.selected_category,
        },
    }))
}

/// POST /api/v1/templates
///
/// Multipart form: `name`, `image` (file), and optionally `select_category`
/// (existing category id) and `custom_category` (free text, takes
/// precedence). Staff uploads become admin templates.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<TemplateView>>)> {
    let mut name: Option<String> = None;
    let mut image: Option<(Option<String>, Vec<u8>)> = None;
    let mut select_category: Option<DbId> = None;
    let mut custom_category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "image" => {
                let filename = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = Some((filename, data.to_vec()));
            }
            "name" | "select_category" | "custom_category" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                match field_name.as_str() {
                    "name" => name = Some(text),
                    "select_category" => select_category = parse_category_id(&text)?,
                    _ => custom_category = Some(text),
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let (original_filename, image_bytes) = image
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("image is required".into())))?;

    let upload = TemplateUpload {
        name,
        image_bytes,
        original_filename,
        category: CategorySelection::from_form(select_category, custom_category.as_deref()),
    };

    let template = state.templates().upload(&user.actor(), upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TemplateView::new(template, state.assets.as_ref()),
        }),
    ))
}

/// An empty `select_category` means "none selected".
fn parse_category_id(raw: &str) -> AppResult<Option<DbId>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<DbId>().map(Some).map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "select_category must be a category id, got '{raw}'"
        )))
    })
}

/// GET /api/v1/templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<TemplateView>>> {
    let template = state.templates().get(id).await?;
    Ok(Json(DataResponse {
        data: TemplateView::new(template, state.assets.as_ref()),
    }))
}

/// DELETE /api/v1/templates/{id}
///
/// Only the uploader may delete a template.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    state.templates().delete(&user.actor(), id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Template deleted successfully!",
    }))
}
