//! Repository for the `templates` table.

use sqlx::{PgPool, Postgres, Transaction};
use studio_core::types::DbId;

use crate::models::template::{CreateTemplate, Template};

const COLUMNS: &str = "id, name, image_key, category_id, uploaded_by, \
     is_admin_template, created_at, updated_at";

/// Provides insert, lookup, listing and deletion for templates.
///
/// There is no update: a template's admin flag and owner are fixed at upload.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template inside an existing transaction.
    pub async fn create_in(
        tx: &mut Transaction<'_, Postgres>,
        uploaded_by: Option<DbId>,
        input: &CreateTemplate,
    ) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates \
                (name, image_key, category_id, uploaded_by, is_admin_template) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.name)
            .bind(&input.image_key)
            .bind(input.category_id)
            .bind(uploaded_by)
            .bind(input.is_admin_template)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a new template, returning the created row.
    pub async fn create(
        pool: &PgPool,
        uploaded_by: Option<DbId>,
        input: &CreateTemplate,
    ) -> Result<Template, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let template = Self::create_in(&mut tx, uploaded_by, input).await?;
        tx.commit().await?;
        Ok(template)
    }

    /// Find a template by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a template by ID inside an existing transaction, locking it
    /// against concurrent deletion until the transaction ends.
    pub async fn find_by_id_for_share_in(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1 FOR SHARE");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List admin templates, newest first, optionally within one category.
    pub async fn list_admin(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates \
             WHERE is_admin_template = true \
               AND ($1::BIGINT IS NULL OR category_id = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// List templates uploaded by `user_id`, newest first, optionally within
    /// one category.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: DbId,
        category_id: Option<DbId>,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates \
             WHERE uploaded_by = $1 \
               AND ($2::BIGINT IS NULL OR category_id = $2) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(user_id)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Hard-delete a template by ID. Designs referencing it keep their rows
    /// with `template_id` set to NULL. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
