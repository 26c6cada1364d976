//! Repository for the `template_categories` table.

use sqlx::{PgPool, Postgres, Transaction};
use studio_core::types::DbId;

use crate::models::category::Category;

const COLUMNS: &str = "id, name, created_by, created_at, updated_at";

/// Provides get-or-create and listing for template categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Return the category named exactly `name`, creating it (attributed to
    /// `created_by`) if it does not exist yet.
    ///
    /// `name` must already be trimmed and non-empty. Concurrent calls with
    /// the same name converge on one row: the insert that loses the
    /// `uq_template_categories_name` race does nothing and the winner's row
    /// is read back.
    pub async fn resolve_or_create(
        pool: &PgPool,
        name: &str,
        created_by: Option<DbId>,
    ) -> Result<Category, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let category = Self::resolve_or_create_in(&mut tx, name, created_by).await?;
        tx.commit().await?;
        Ok(category)
    }

    /// [`resolve_or_create`](Self::resolve_or_create) inside an existing transaction.
    pub async fn resolve_or_create_in(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        created_by: Option<DbId>,
    ) -> Result<Category, sqlx::Error> {
        let insert = format!(
            "INSERT INTO template_categories (name, created_by) \
             VALUES ($1, $2) \
             ON CONFLICT (name) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Category>(&insert)
            .bind(name)
            .bind(created_by)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(category) = inserted {
            tracing::debug!(category_id = category.id, name, "Category created");
            return Ok(category);
        }

        let select = format!("SELECT {COLUMNS} FROM template_categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&select)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM template_categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by ID inside an existing transaction.
    pub async fn find_by_id_in(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM template_categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List categories that have at least one template, ordered by name.
    pub async fn list_nonempty(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM template_categories c \
             WHERE EXISTS (SELECT 1 FROM templates t WHERE t.category_id = c.id) \
             ORDER BY c.name ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(pool)
            .await
    }
}
