//! Design Store.
//!
//! A save runs in one transaction:
//!
//! 1. lock the referenced template (`FOR SHARE`), or fail with `NotFound`
//! 2. for an update, lock the design (`FOR UPDATE`) and check ownership
//! 3. decode the preview, if any
//! 4. write the preview asset
//! 5. insert or update the row and commit
//!
//! Nothing is written before step 4, and a failure in step 5 removes the
//! asset again, so a failed save leaves the prior state untouched and no
//! row ever points at a missing file. Concurrent saves of one design are
//! serialized by the row lock; the last commit wins.

use std::sync::Arc;

use sqlx::{PgPool, Postgres, Transaction};
use studio_core::assets::{AssetStore, PREFIX_SAVED_DESIGNS};
use studio_core::design::{DesignDraft, SaveDesignRequest};
use studio_core::error::CoreError;
use studio_core::ownership::{denied, require_owned};
use studio_core::types::{Actor, DbId};
use studio_db::models::design::{CreateDesign, Design, UpdateDesign};
use studio_db::repositories::{DesignRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::services::discard_asset;

#[derive(Clone)]
pub struct DesignStore {
    pool: PgPool,
    assets: Arc<dyn AssetStore>,
}

impl DesignStore {
    pub fn new(pool: PgPool, assets: Arc<dyn AssetStore>) -> Self {
        Self { pool, assets }
    }

    /// Create (no `design_id`) or overwrite (with `design_id`) a design.
    ///
    /// Updates replace name and canvas, and the preview when a new one is
    /// sent. Owner and template are fixed at creation.
    pub async fn save(&self, actor: &Actor, request: SaveDesignRequest) -> AppResult<Design> {
        let mut tx = self.pool.begin().await?;

        let template_id = request.template_id;
        TemplateRepo::find_by_id_for_share_in(&mut tx, template_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Template",
                id: template_id,
            }))?;

        if let Some(design_id) = request.design_id {
            let existing = DesignRepo::find_by_id_for_update_in(&mut tx, design_id).await?;
            require_owned(existing, design_id, actor.user_id)?;
        }

        let draft = request.into_draft()?;

        let preview_key = match &draft.preview {
            Some(preview) => Some(
                self.assets
                    .put(PREFIX_SAVED_DESIGNS, &preview.filename, &preview.bytes)
                    .await?,
            ),
            None => None,
        };

        match Self::write_row(tx, actor, draft, preview_key.clone()).await {
            Ok(design) => {
                tracing::info!(
                    design_id = design.id,
                    user_id = actor.user_id,
                    template_id = ?design.template_id,
                    asset_key = ?preview_key,
                    "Design saved",
                );
                Ok(design)
            }
            Err(e) => {
                if let Some(key) = &preview_key {
                    discard_asset(self.assets.as_ref(), key).await;
                }
                Err(e)
            }
        }
    }

    async fn write_row(
        mut tx: Transaction<'_, Postgres>,
        actor: &Actor,
        draft: DesignDraft,
        preview_key: Option<String>,
    ) -> AppResult<Design> {
        let design = match draft.design_id {
            Some(design_id) => {
                let input = UpdateDesign {
                    design_name: draft.name,
                    canvas_data: draft.canvas_data,
                    preview_key,
                };
                DesignRepo::update_owned_in(&mut tx, design_id, actor.user_id, &input)
                    .await?
                    .ok_or_else(|| AppError::Core(denied::<Design>(design_id)))?
            }
            None => {
                let input = CreateDesign {
                    template_id: draft.template_id,
                    design_name: draft.name,
                    canvas_data: draft.canvas_data,
                    preview_key,
                };
                DesignRepo::create_in(&mut tx, actor.user_id, &input).await?
            }
        };
        tx.commit().await?;
        Ok(design)
    }

    /// Load a design the actor owns.
    pub async fn get(&self, actor: &Actor, design_id: DbId) -> AppResult<Design> {
        let design = DesignRepo::find_by_id(&self.pool, design_id).await?;
        Ok(require_owned(design, design_id, actor.user_id)?)
    }

    /// The actor's designs, most recently updated first.
    ///
    /// With `require_template_present`, designs whose template was deleted
    /// are left out (they cannot be reopened in the editor).
    pub async fn list_for(
        &self,
        actor: &Actor,
        require_template_present: bool,
    ) -> AppResult<Vec<Design>> {
        Ok(DesignRepo::list_for_user(&self.pool, actor.user_id, require_template_present).await?)
    }

    /// Delete a design the actor owns. The preview file is kept.
    pub async fn delete(&self, actor: &Actor, design_id: DbId) -> AppResult<()> {
        let removed = DesignRepo::delete_owned(&self.pool, design_id, actor.user_id).await?;
        if !removed {
            return Err(AppError::Core(denied::<Design>(design_id)));
        }
        tracing::info!(design_id, user_id = actor.user_id, "Design deleted");
        Ok(())
    }
}
