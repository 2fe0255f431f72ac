//! Score record creation and in-place edits.

use sqlx::SqlitePool;
use tally_core::error::CoreError;
use tally_core::types::{DbId, MAX_REASON_LEN};
use tally_db::models::score::{CreateScore, ScoreRecord, UpdateScore};
use tally_db::repositories::{ParticipantRepo, ScoreRepo};

use crate::error::{StoreError, StoreResult};

fn normalized_reason(reason: &str) -> StoreResult<String> {
    let reason = reason.trim().to_string();
    if reason.is_empty() {
        return Err(CoreError::Validation("reason is required".to_string()).into());
    }
    if reason.chars().count() > MAX_REASON_LEN {
        return Err(CoreError::Validation(format!(
            "reason exceeds {MAX_REASON_LEN} characters"
        ))
        .into());
    }
    Ok(reason)
}

/// Record a point adjustment for a participant. Points may be any signed
/// value including zero; there is no dedup and no rate limit.
///
/// The record's activity is taken from the owning participant, so the
/// denormalized `activity_id` column can never drift from the truth.
pub async fn add(pool: &SqlitePool, input: &CreateScore) -> StoreResult<ScoreRecord> {
    let reason = normalized_reason(&input.reason)?;

    let participant = ParticipantRepo::find_by_id(pool, input.participant_id)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Participant",
            id: input.participant_id,
        }))?;

    let record = ScoreRepo::insert(
        pool,
        participant.id,
        participant.activity_id,
        input.points,
        &reason,
    )
    .await?;
    tracing::debug!(
        score_id = record.id,
        participant_id = participant.id,
        points = input.points,
        "added score"
    );
    Ok(record)
}

/// Overwrite a record's points and reason in place. The creation timestamp
/// is untouched: edits do not re-order history.
pub async fn edit(pool: &SqlitePool, id: DbId, input: &UpdateScore) -> StoreResult<ScoreRecord> {
    let reason = normalized_reason(&input.reason)?;

    ScoreRepo::update(pool, id, input.points, &reason)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "ScoreRecord",
            id,
        }))
}

/// Fetch a score record by ID.
pub async fn get(pool: &SqlitePool, id: DbId) -> StoreResult<Option<ScoreRecord>> {
    Ok(ScoreRepo::find_by_id(pool, id).await?)
}

/// One participant's records, newest first.
pub async fn list_for_participant(
    pool: &SqlitePool,
    participant_id: DbId,
) -> StoreResult<Vec<ScoreRecord>> {
    Ok(ScoreRepo::list_by_participant(pool, participant_id).await?)
}
