//! Repository for the `user_uploaded_images` table.

use sqlx::PgPool;
use studio_core::types::DbId;

use crate::models::uploaded_image::UploadedImage;

const COLUMNS: &str = "id, user_id, image_key, created_at AS uploaded_at";

/// Provides insert and listing for the editor's per-user image pool.
pub struct UploadedImageRepo;

impl UploadedImageRepo {
    /// Record an uploaded image, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        image_key: &str,
    ) -> Result<UploadedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_uploaded_images (user_id, image_key) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UploadedImage>(&query)
            .bind(user_id)
            .bind(image_key)
            .fetch_one(pool)
            .await
    }

    /// List a user's uploaded images, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UploadedImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_uploaded_images \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, UploadedImage>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
