//! Repository for the `activities` table.

use sqlx::SqlitePool;
use tally_core::types::DbId;

use crate::models::activity::Activity;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, pin, owner_id, deleted, created_at";

/// Provides CRUD operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity with a pre-allocated PIN, returning the
    /// created row. Duplicate checks happen in the store layer.
    pub async fn insert(
        pool: &SqlitePool,
        owner_id: DbId,
        name: &str,
        description: Option<&str>,
        pin: &str,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (name, description, pin, owner_id, deleted, created_at)
             VALUES (?, ?, ?, ?, 0, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(name)
            .bind(description)
            .bind(pin)
            .bind(owner_id)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find an activity by internal ID. Hidden activities are included:
    /// the owner's restore path needs to see them.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = ?");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an activity by join PIN. Hidden activities are included: the
    /// PIN stays valid while hidden so its owner can reclaim it.
    pub async fn find_by_pin(
        pool: &SqlitePool,
        pin: &str,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE pin = ?");
        sqlx::query_as::<_, Activity>(&query)
            .bind(pin)
            .fetch_optional(pool)
            .await
    }

    /// Non-hidden activities of one owner, most recently created first.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: DbId,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE owner_id = ? AND deleted = 0
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a non-hidden activity with the same (owner, name,
    /// description-or-empty) triple exists, excluding `exclude_id` when
    /// given. `description` must already be normalized (trimmed-or-empty).
    pub async fn active_duplicate_exists(
        pool: &SqlitePool,
        owner_id: DbId,
        name: &str,
        description: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM activities
             WHERE owner_id = ? AND name = ? AND COALESCE(description, '') = ?
               AND deleted = 0 AND id != COALESCE(?, -1)
             LIMIT 1",
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(exclude_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Whether any activity, hidden or not, already uses `pin`.
    pub async fn pin_exists(pool: &SqlitePool, pin: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM activities WHERE pin = ? LIMIT 1")
                .bind(pin)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    /// Overwrite name and description. PIN and owner are immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_details(
        pool: &SqlitePool,
        id: DbId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET name = ?, description = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(name)
            .bind(description)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the soft-delete flag, returning the updated row. Idempotent:
    /// setting an already-matching flag is not an error.
    pub async fn set_deleted(
        pool: &SqlitePool,
        id: DbId,
        deleted: bool,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET deleted = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(deleted)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
