//! Participant management within an activity.

use std::collections::HashSet;

use sqlx::SqlitePool;
use tally_core::error::CoreError;
use tally_core::types::{DbId, MAX_NAME_LEN};
use tally_db::models::participant::{CreateParticipant, Participant};
use tally_db::repositories::{ActivityRepo, ParticipantRepo};

use crate::error::{StoreError, StoreResult};

fn normalized_name(name: &str) -> StoreResult<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::Validation("participant name is required".to_string()).into());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "participant name exceeds {MAX_NAME_LEN} characters"
        ))
        .into());
    }
    Ok(name)
}

async fn ensure_activity_exists(pool: &SqlitePool, activity_id: DbId) -> StoreResult<()> {
    if ActivityRepo::find_by_id(pool, activity_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }
        .into());
    }
    Ok(())
}

/// Add a single participant. Fails with `Duplicate` when the activity
/// already has a participant with the same name, compared
/// case-insensitively after trimming.
pub async fn create(pool: &SqlitePool, input: &CreateParticipant) -> StoreResult<Participant> {
    let name = normalized_name(&input.name)?;
    ensure_activity_exists(pool, input.activity_id).await?;

    if ParticipantRepo::name_exists(pool, input.activity_id, &name, None).await? {
        return Err(CoreError::Duplicate {
            field: "participant name",
        }
        .into());
    }

    let participant = ParticipantRepo::insert(pool, input.activity_id, &name).await?;
    tracing::debug!(
        participant_id = participant.id,
        activity_id = input.activity_id,
        "created participant"
    );
    Ok(participant)
}

/// Add many participants at once, as from a roster import.
///
/// Blank and overlong names are dropped, and names already present in the
/// activity or earlier in the batch are skipped case-insensitively (first
/// occurrence wins). Returns exactly the created subset; callers derive the
/// skip count from `input length - returned length`.
pub async fn create_batch(
    pool: &SqlitePool,
    activity_id: DbId,
    names: &[String],
) -> StoreResult<Vec<Participant>> {
    ensure_activity_exists(pool, activity_id).await?;

    let existing = ParticipantRepo::list_by_activity(pool, activity_id).await?;
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|p| p.name.trim().to_lowercase())
        .collect();

    let mut created = Vec::new();
    for raw in names {
        let name = raw.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            continue;
        }
        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        let participant = ParticipantRepo::insert(pool, activity_id, name).await?;
        seen.insert(key);
        created.push(participant);
    }

    tracing::debug!(
        activity_id,
        requested = names.len(),
        created = created.len(),
        "batch created participants"
    );
    Ok(created)
}

/// Rename a participant, under the same duplicate rule as `create`,
/// excluding the participant itself.
pub async fn rename(pool: &SqlitePool, id: DbId, name: &str) -> StoreResult<Participant> {
    let name = normalized_name(name)?;

    let participant = ParticipantRepo::find_by_id(pool, id)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Participant",
            id,
        }))?;

    if ParticipantRepo::name_exists(pool, participant.activity_id, &name, Some(id)).await? {
        return Err(CoreError::Duplicate {
            field: "participant name",
        }
        .into());
    }

    ParticipantRepo::update_name(pool, id, &name)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Participant",
            id,
        }))
}

/// Delete a participant and, atomically, every score record they own.
pub async fn delete(pool: &SqlitePool, id: DbId) -> StoreResult<()> {
    let deleted = ParticipantRepo::delete_with_scores(pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Participant",
            id,
        }
        .into());
    }
    tracing::info!(participant_id = id, "deleted participant and their scores");
    Ok(())
}

/// Fetch a participant by ID.
pub async fn get(pool: &SqlitePool, id: DbId) -> StoreResult<Option<Participant>> {
    Ok(ParticipantRepo::find_by_id(pool, id).await?)
}

/// All participants of an activity, in insertion order.
pub async fn list_for_activity(
    pool: &SqlitePool,
    activity_id: DbId,
) -> StoreResult<Vec<Participant>> {
    Ok(ParticipantRepo::list_by_activity(pool, activity_id).await?)
}
