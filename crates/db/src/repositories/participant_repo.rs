//! Repository for the `participants` table.

use sqlx::SqlitePool;
use tally_core::types::DbId;

use crate::models::participant::Participant;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, activity_id, name";

/// Provides CRUD operations for participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a new participant, returning the created row. Name uniqueness
    /// checks happen in the store layer.
    pub async fn insert(
        pool: &SqlitePool,
        activity_id: DbId,
        name: &str,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO participants (activity_id, name)
             VALUES (?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(activity_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a participant by internal ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE id = ?");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All participants of an activity, in insertion order.
    pub async fn list_by_activity(
        pool: &SqlitePool,
        activity_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participants WHERE activity_id = ? ORDER BY id"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a participant with the same name (case-insensitive) exists
    /// in the activity, excluding `exclude_id` when given.
    pub async fn name_exists(
        pool: &SqlitePool,
        activity_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM participants
             WHERE activity_id = ? AND lower(name) = lower(?)
               AND id != COALESCE(?, -1)
             LIMIT 1",
        )
        .bind(activity_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Overwrite a participant's name.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_name(
        pool: &SqlitePool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "UPDATE participants SET name = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(name)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a participant and all of their score records in one
    /// transaction. Scores without a subject are meaningless, so this is a
    /// hard cascade; a failure rolls the whole delete back.
    ///
    /// Returns `true` if the participant existed.
    pub async fn delete_with_scores(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM scores WHERE participant_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM participants WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
