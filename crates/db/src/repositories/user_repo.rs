//! Repository for the `users` table.

use sqlx::PgPool;
use studio_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, is_staff, created_at, updated_at";

/// Provides the user operations the editor backend needs: owner rows to
/// reference, and removal (which cascades to owned templates, designs and
/// uploads).
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, is_staff) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(input.is_staff)
            .fetch_one(pool)
            .await
    }

    /// Hard-delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
