//! Category Registry.

use sqlx::{PgPool, Postgres, Transaction};
use studio_core::category::normalize_category_name;
use studio_core::error::CoreError;
use studio_core::types::{Actor, DbId};
use studio_db::models::category::Category;
use studio_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};

/// Resolves free-text category names and lists categories in use.
#[derive(Clone)]
pub struct CategoryRegistry {
    pool: PgPool,
}

impl CategoryRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the category named `name` (after trimming), creating it on
    /// behalf of `actor` when missing. A blank name means "no category".
    ///
    /// Safe under concurrent calls with the same name: both callers get the
    /// same row.
    pub async fn resolve_or_create(
        &self,
        name: &str,
        actor: &Actor,
    ) -> AppResult<Option<Category>> {
        let Some(name) = normalize_category_name(name)? else {
            return Ok(None);
        };
        let category =
            CategoryRepo::resolve_or_create(&self.pool, &name, Some(actor.user_id)).await?;
        Ok(Some(category))
    }

    /// [`resolve_or_create`](Self::resolve_or_create) inside a caller-owned transaction.
    pub async fn resolve_or_create_in(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        actor: &Actor,
    ) -> AppResult<Option<Category>> {
        let Some(name) = normalize_category_name(name)? else {
            return Ok(None);
        };
        let category = CategoryRepo::resolve_or_create_in(tx, &name, Some(actor.user_id)).await?;
        Ok(Some(category))
    }

    /// Categories with at least one template, ordered by name.
    pub async fn list_nonempty(&self) -> AppResult<Vec<Category>> {
        Ok(CategoryRepo::list_nonempty(&self.pool).await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Category> {
        CategoryRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Category",
                id,
            }))
    }
}
