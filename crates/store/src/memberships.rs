//! Membership links: joining activities by PIN and listing joined ones.

use sqlx::SqlitePool;
use tally_core::error::CoreError;
use tally_core::types::DbId;
use tally_db::models::activity::Activity;
use tally_db::models::membership::Membership;
use tally_db::repositories::{ActivityRepo, MembershipRepo};

use crate::error::{StoreError, StoreResult};

/// Link `user_id` to an activity. Idempotent: joining twice returns the
/// existing link as success, never an error.
pub async fn join(
    pool: &SqlitePool,
    user_id: DbId,
    activity_id: DbId,
) -> StoreResult<Membership> {
    if ActivityRepo::find_by_id(pool, activity_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }
        .into());
    }

    if let Some(existing) =
        MembershipRepo::find_by_user_and_activity(pool, user_id, activity_id).await?
    {
        return Ok(existing);
    }

    match MembershipRepo::insert(pool, user_id, activity_id).await {
        Ok(link) => {
            tracing::info!(user_id, activity_id, "joined activity");
            Ok(link)
        }
        // A racing join hit the unique (user, activity) index first; the
        // surviving row is the answer either way.
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            let existing =
                MembershipRepo::find_by_user_and_activity(pool, user_id, activity_id).await?;
            existing.ok_or_else(|| StoreError::Database(sqlx::Error::Database(db_err)))
        }
        Err(err) => Err(err.into()),
    }
}

/// Non-hidden activities `user_id` has joined, most recent join first.
pub async fn joined_activities(
    pool: &SqlitePool,
    user_id: DbId,
) -> StoreResult<Vec<Activity>> {
    Ok(MembershipRepo::list_joined_activities(pool, user_id).await?)
}
