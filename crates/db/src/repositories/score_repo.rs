//! Repository for the `scores` table.

use sqlx::SqlitePool;
use tally_core::types::DbId;

use crate::models::score::ScoreRecord;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, participant_id, activity_id, points, reason, created_at";

/// Provides CRUD operations for score records.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Insert a new score record, returning the created row. `activity_id`
    /// must be the owning participant's activity; the store derives it so
    /// the denormalized column cannot drift.
    pub async fn insert(
        pool: &SqlitePool,
        participant_id: DbId,
        activity_id: DbId,
        points: i64,
        reason: &str,
    ) -> Result<ScoreRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores (participant_id, activity_id, points, reason, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(participant_id)
            .bind(activity_id)
            .bind(points)
            .bind(reason)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a score record by internal ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<ScoreRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scores WHERE id = ?");
        sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One participant's records, newest first.
    pub async fn list_by_participant(
        pool: &SqlitePool,
        participant_id: DbId,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scores
             WHERE participant_id = ?
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(participant_id)
            .fetch_all(pool)
            .await
    }

    /// All records of an activity in one pass, oldest first. This is the
    /// bulk read the aggregator folds over instead of re-querying per
    /// participant.
    pub async fn list_by_activity(
        pool: &SqlitePool,
        activity_id: DbId,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scores
             WHERE activity_id = ?
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite points and reason in place. `created_at` is untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        points: i64,
        reason: &str,
    ) -> Result<Option<ScoreRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE scores SET points = ?, reason = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(points)
            .bind(reason)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Sum of one participant's points; 0 when they have no records.
    pub async fn sum_for_participant(
        pool: &SqlitePool,
        participant_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(points), 0) FROM scores WHERE participant_id = ?",
        )
        .bind(participant_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
