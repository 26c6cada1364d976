//! Template Catalog.
//!
//! Templates are append-mostly: they are uploaded, listed and opened in the
//! editor. Only the uploader may delete one, and designs built on a deleted
//! template survive with `template_id = NULL`.

use std::sync::Arc;

use sqlx::PgPool;
use studio_core::assets::{AssetStore, PREFIX_TEMPLATES};
use studio_core::category::CategorySelection;
use studio_core::error::CoreError;
use studio_core::images::inspect_image;
use studio_core::naming::{asset_filename, split_extension};
use studio_core::ownership::require_owned;
use studio_core::types::{Actor, DbId};
use studio_core::validation::require_name;
use studio_db::models::category::Category;
use studio_db::models::template::{CreateTemplate, Template};
use studio_db::repositories::{CategoryRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::services::{discard_asset, CategoryRegistry};

/// A template upload as received from the form layer.
#[derive(Debug, Clone)]
pub struct TemplateUpload {
    /// Raw display name; trimmed and validated on upload.
    pub name: Option<String>,
    pub image_bytes: Vec<u8>,
    /// Client-side filename, used only to name the stored file.
    pub original_filename: Option<String>,
    pub category: CategorySelection,
}

/// Templates visible to one visitor.
#[derive(Debug)]
pub struct TemplateListing {
    /// Staff uploads, visible to everyone.
    pub admin_templates: Vec<Template>,
    /// The visitor's own uploads; empty for anonymous visitors.
    pub user_templates: Vec<Template>,
    /// The category the listing was filtered by, if any.
    pub selected_category: Option<Category>,
}

#[derive(Clone)]
pub struct TemplateCatalog {
    pool: PgPool,
    assets: Arc<dyn AssetStore>,
}

impl TemplateCatalog {
    pub fn new(pool: PgPool, assets: Arc<dyn AssetStore>) -> Self {
        Self { pool, assets }
    }

    /// Store a new template image and register it.
    ///
    /// The admin flag is taken from `actor.is_staff` and never changes
    /// afterwards. Category resolution, the image write and the row insert
    /// succeed or fail together.
    pub async fn upload(&self, actor: &Actor, upload: TemplateUpload) -> AppResult<Template> {
        let name = require_name("name", upload.name.as_deref())?;
        let info = inspect_image(&upload.image_bytes)?;

        let base_name = upload
            .original_filename
            .as_deref()
            .map(|f| split_extension(f).0)
            .filter(|stem| !stem.trim().is_empty())
            .unwrap_or(name.as_str());
        let filename = asset_filename(base_name, info.extension);

        let mut tx = self.pool.begin().await?;

        let category_id = match &upload.category {
            CategorySelection::Existing { id } => {
                let category = CategoryRepo::find_by_id_in(&mut tx, *id).await?.ok_or(
                    AppError::Core(CoreError::NotFound {
                        entity: "Category",
                        id: *id,
                    }),
                )?;
                Some(category.id)
            }
            CategorySelection::New { name } => {
                CategoryRegistry::resolve_or_create_in(&mut tx, name, actor)
                    .await?
                    .map(|c| c.id)
            }
            CategorySelection::None => None,
        };

        let image_key = self
            .assets
            .put(PREFIX_TEMPLATES, &filename, &upload.image_bytes)
            .await?;

        let input = CreateTemplate {
            name,
            image_key: image_key.clone(),
            category_id,
            is_admin_template: actor.is_staff,
        };

        let created = match TemplateRepo::create_in(&mut tx, Some(actor.user_id), &input).await {
            Ok(template) => tx.commit().await.map(|()| template),
            Err(e) => Err(e),
        };

        match created {
            Ok(template) => {
                tracing::info!(
                    template_id = template.id,
                    user_id = actor.user_id,
                    category_id = ?template.category_id,
                    is_admin_template = template.is_admin_template,
                    asset_key = %template.image_key,
                    "Template uploaded",
                );
                Ok(template)
            }
            Err(e) => {
                discard_asset(self.assets.as_ref(), &image_key).await;
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: DbId) -> AppResult<Template> {
        TemplateRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Template",
                id,
            }))
    }

    /// Admin templates plus (for a signed-in visitor) their own uploads,
    /// newest first, optionally within one category.
    ///
    /// An unknown `category_id` is reported as `NotFound`.
    pub async fn list_visible(
        &self,
        actor: Option<&Actor>,
        category_id: Option<DbId>,
    ) -> AppResult<TemplateListing> {
        let selected_category = match category_id {
            Some(id) => Some(CategoryRegistry::new(self.pool.clone()).get(id).await?),
            None => None,
        };

        let admin_templates = TemplateRepo::list_admin(&self.pool, category_id).await?;
        let user_templates = match actor {
            Some(actor) => {
                TemplateRepo::list_by_owner(&self.pool, actor.user_id, category_id).await?
            }
            None => Vec::new(),
        };

        Ok(TemplateListing {
            admin_templates,
            user_templates,
            selected_category,
        })
    }

    /// Delete a template the actor uploaded.
    ///
    /// Designs referencing it keep their rows with `template_id = NULL`. The
    /// stored image stays in place.
    pub async fn delete(&self, actor: &Actor, id: DbId) -> AppResult<()> {
        let template = TemplateRepo::find_by_id(&self.pool, id).await?;
        require_owned(template, id, actor.user_id)?;

        // A concurrent delete of the same row is harmless.
        TemplateRepo::delete(&self.pool, id).await?;

        tracing::info!(template_id = id, user_id = actor.user_id, "Template deleted");
        Ok(())
    }
}
