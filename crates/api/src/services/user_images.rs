//! The editor's per-user image pool.

use std::sync::Arc;

use sqlx::PgPool;
use studio_core::assets::{AssetStore, PREFIX_USER_IMAGES};
use studio_core::images::inspect_image;
use studio_core::naming::{asset_filename, split_extension};
use studio_core::types::Actor;
use studio_db::models::uploaded_image::UploadedImage;
use studio_db::repositories::UploadedImageRepo;

use crate::error::AppResult;
use crate::services::discard_asset;

#[derive(Clone)]
pub struct UserImages {
    pool: PgPool,
    assets: Arc<dyn AssetStore>,
}

impl UserImages {
    pub fn new(pool: PgPool, assets: Arc<dyn AssetStore>) -> Self {
        Self { pool, assets }
    }

    /// Validate, store and record an image uploaded from the editor.
    pub async fn upload(
        &self,
        actor: &Actor,
        bytes: &[u8],
        original_filename: Option<&str>,
    ) -> AppResult<UploadedImage> {
        let info = inspect_image(bytes)?;

        let stem = original_filename.map_or("image", |f| split_extension(f).0);
        let filename = asset_filename(stem, info.extension);
        let image_key = self.assets.put(PREFIX_USER_IMAGES, &filename, bytes).await?;

        match UploadedImageRepo::create(&self.pool, actor.user_id, &image_key).await {
            Ok(image) => {
                tracing::info!(
                    image_id = image.id,
                    user_id = actor.user_id,
                    asset_key = %image_key,
                    width = info.width,
                    height = info.height,
                    "User image uploaded",
                );
                Ok(image)
            }
            Err(e) => {
                discard_asset(self.assets.as_ref(), &image_key).await;
                Err(e.into())
            }
        }
    }

    /// The actor's uploads, newest first.
    pub async fn list(&self, actor: &Actor) -> AppResult<Vec<UploadedImage>> {
        Ok(UploadedImageRepo::list_for_user(&self.pool, actor.user_id).await?)
    }
}
