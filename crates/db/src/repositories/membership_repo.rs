//! Repository for the `memberships` table.

use sqlx::SqlitePool;
use tally_core::types::DbId;

use crate::models::activity::Activity;
use crate::models::membership::Membership;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, activity_id, joined_at";

/// Provides CRUD operations for membership links.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Insert a membership link, returning the created row. Fails with a
    /// unique violation when the (user, activity) pair already exists; the
    /// store converts that into idempotent success.
    pub async fn insert(
        pool: &SqlitePool,
        user_id: DbId,
        activity_id: DbId,
    ) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships (user_id, activity_id, joined_at)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .bind(activity_id)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find the link between one user and one activity.
    pub async fn find_by_user_and_activity(
        pool: &SqlitePool,
        user_id: DbId,
        activity_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships WHERE user_id = ? AND activity_id = ?"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .bind(activity_id)
            .fetch_optional(pool)
            .await
    }

    /// Non-hidden activities a user has joined, most recent join first.
    pub async fn list_joined_activities(
        pool: &SqlitePool,
        user_id: DbId,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            "SELECT a.id, a.name, a.description, a.pin, a.owner_id, a.deleted, a.created_at
             FROM activities a
             JOIN memberships m ON m.activity_id = a.id
             WHERE m.user_id = ? AND a.deleted = 0
             ORDER BY m.joined_at DESC, m.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
