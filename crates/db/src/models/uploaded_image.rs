//! Editor upload pool model.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `user_uploaded_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UploadedImage {
    pub id: DbId,
    pub user_id: DbId,
    /// Asset key of the image (under `user_images/`).
    pub image_key: String,
    pub uploaded_at: Timestamp,
}
