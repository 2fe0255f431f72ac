//! Repository for the `users` table.

use sqlx::SqlitePool;
use tally_core::types::DbId;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, display_name, access_code, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with a pre-allocated access code, returning the
    /// created row.
    pub async fn insert(
        pool: &SqlitePool,
        display_name: &str,
        access_code: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (display_name, access_code, created_at)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(display_name)
            .bind(access_code)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user holding `access_code`.
    pub async fn find_by_access_code(
        pool: &SqlitePool,
        access_code: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE access_code = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(access_code)
            .fetch_optional(pool)
            .await
    }

    /// Whether any user already holds `access_code`.
    pub async fn access_code_exists(
        pool: &SqlitePool,
        access_code: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM users WHERE access_code = ? LIMIT 1")
                .bind(access_code)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }
}
