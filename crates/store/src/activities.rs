//! Activity lifecycle: create, update, hide, restore, and lookups.

use sqlx::SqlitePool;
use tally_core::codes::is_valid_code_format;
use tally_core::error::CoreError;
use tally_core::types::{DbId, MAX_NAME_LEN};
use tally_db::models::activity::{Activity, CreateActivity, UpdateActivity};
use tally_db::repositories::ActivityRepo;

use crate::codes;
use crate::error::{StoreError, StoreResult};
use crate::guard;

/// Trim and validate an activity name/description pair. An empty
/// description becomes `None`.
fn normalized(
    name: &str,
    description: Option<&str>,
) -> StoreResult<(String, Option<String>)> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::Validation("activity name is required".to_string()).into());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "activity name exceeds {MAX_NAME_LEN} characters"
        ))
        .into());
    }
    let description = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);
    Ok((name, description))
}

/// Create an activity owned by `owner_id` with a freshly allocated PIN.
///
/// Fails with `Duplicate` when the owner already has a non-hidden activity
/// with the same trimmed name and description.
pub async fn create(
    pool: &SqlitePool,
    owner_id: DbId,
    input: &CreateActivity,
) -> StoreResult<Activity> {
    let (name, description) = normalized(&input.name, input.description.as_deref())?;

    let duplicate = ActivityRepo::active_duplicate_exists(
        pool,
        owner_id,
        &name,
        description.as_deref().unwrap_or(""),
        None,
    )
    .await?;
    if duplicate {
        return Err(CoreError::Duplicate {
            field: "activity name and description",
        }
        .into());
    }

    let pin = codes::allocate_pin(pool).await?;
    let activity =
        ActivityRepo::insert(pool, owner_id, &name, description.as_deref(), &pin).await?;
    tracing::info!(activity_id = activity.id, owner_id, "created activity");
    Ok(activity)
}

/// Overwrite an activity's name and description. Owner-gated; PIN and owner
/// are immutable post-creation.
pub async fn update(
    pool: &SqlitePool,
    id: DbId,
    owner_id: DbId,
    input: &UpdateActivity,
) -> StoreResult<Activity> {
    let (name, description) = normalized(&input.name, input.description.as_deref())?;

    let activity = ActivityRepo::find_by_id(pool, id)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))?;
    guard::ensure_owner(&activity, owner_id)?;

    let duplicate = ActivityRepo::active_duplicate_exists(
        pool,
        owner_id,
        &name,
        description.as_deref().unwrap_or(""),
        Some(id),
    )
    .await?;
    if duplicate {
        return Err(CoreError::Duplicate {
            field: "activity name and description",
        }
        .into());
    }

    ActivityRepo::update_details(pool, id, &name, description.as_deref())
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))
}

/// Hide an activity from its owner's list. Data is retained, the PIN stays
/// reserved, and `restore` undoes it.
pub async fn hide(pool: &SqlitePool, id: DbId, owner_id: DbId) -> StoreResult<Activity> {
    set_deleted(pool, id, owner_id, true).await
}

/// Restore a hidden activity. This is how an owner reclaims an activity
/// whose PIN someone else tried to join while it was hidden.
pub async fn restore(pool: &SqlitePool, id: DbId, owner_id: DbId) -> StoreResult<Activity> {
    set_deleted(pool, id, owner_id, false).await
}

async fn set_deleted(
    pool: &SqlitePool,
    id: DbId,
    owner_id: DbId,
    deleted: bool,
) -> StoreResult<Activity> {
    let activity = ActivityRepo::find_by_id(pool, id)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))?;
    guard::ensure_owner(&activity, owner_id)?;

    let updated = ActivityRepo::set_deleted(pool, id, deleted)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))?;
    tracing::info!(activity_id = id, owner_id, deleted, "toggled activity visibility");
    Ok(updated)
}

/// Fetch an activity by ID, hidden ones included (the owner's detail and
/// restore views need them).
pub async fn get(pool: &SqlitePool, id: DbId) -> StoreResult<Option<Activity>> {
    Ok(ActivityRepo::find_by_id(pool, id).await?)
}

/// Resolve a join PIN to its activity, hidden ones included. Returns
/// `Ok(None)` when no activity holds the PIN; a malformed PIN is a
/// validation error before any lookup.
pub async fn get_by_pin(pool: &SqlitePool, pin: &str) -> StoreResult<Option<Activity>> {
    let pin = pin.trim();
    if !is_valid_code_format(pin) {
        return Err(CoreError::Validation("pin must be 6 digits".to_string()).into());
    }
    Ok(ActivityRepo::find_by_pin(pool, pin).await?)
}

/// Non-hidden activities owned by `owner_id`, newest first.
pub async fn list_owned(pool: &SqlitePool, owner_id: DbId) -> StoreResult<Vec<Activity>> {
    Ok(ActivityRepo::list_by_owner(pool, owner_id).await?)
}
