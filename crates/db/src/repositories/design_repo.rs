//! Repository for the `user_designs` table.

use sqlx::{PgPool, Postgres, Transaction};
use studio_core::types::DbId;

use crate::models::design::{CreateDesign, Design, UpdateDesign};

const COLUMNS: &str = "id, user_id, template_id, design_name, canvas_data, \
     preview_key, created_at, updated_at";

/// Provides persistence for saved designs.
///
/// Ownership checks live in the service layer; the `_owned` variants here
/// additionally scope their statement to the owner so a stale check can
/// never touch someone else's row.
pub struct DesignRepo;

impl DesignRepo {
    /// Insert a new design owned by `user_id` inside an existing transaction.
    pub async fn create_in(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        input: &CreateDesign,
    ) -> Result<Design, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_designs \
                (user_id, template_id, design_name, canvas_data, preview_key) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(user_id)
            .bind(input.template_id)
            .bind(&input.design_name)
            .bind(&input.canvas_data)
            .bind(&input.preview_key)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a design by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Design>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_designs WHERE id = $1");
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a design by ID and lock its row until the transaction ends, so
    /// concurrent saves of the same design apply one after the other.
    pub async fn find_by_id_for_update_in(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Design>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_designs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Overwrite name and canvas (and the preview, when given) of a design
    /// owned by `user_id`. Returns `None` if no such owned row exists.
    pub async fn update_owned_in(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        user_id: DbId,
        input: &UpdateDesign,
    ) -> Result<Option<Design>, sqlx::Error> {
        let query = format!(
            "UPDATE user_designs SET \
                design_name = $3, \
                canvas_data = $4, \
                preview_key = COALESCE($5, preview_key) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.design_name)
            .bind(&input.canvas_data)
            .bind(&input.preview_key)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a user's designs, most recently updated first.
    ///
    /// With `require_template` set, designs whose template was deleted are
    /// left out.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        require_template: bool,
    ) -> Result<Vec<Design>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_designs \
             WHERE user_id = $1 \
               AND (NOT $2 OR template_id IS NOT NULL) \
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(user_id)
            .bind(require_template)
            .fetch_all(pool)
            .await
    }

    /// Delete a design owned by `user_id`. Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_designs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
