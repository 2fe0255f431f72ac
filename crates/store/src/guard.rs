//! Owner checks for mutating activity operations.
//!
//! Known gap, preserved on purpose: participant and score mutations are not
//! membership-gated. The join PIN is the de facto token for who may
//! contribute to an activity; only activity-level mutations (edit, hide,
//! restore) require the owner.

use tally_core::error::CoreError;
use tally_core::types::DbId;
use tally_db::models::activity::Activity;

/// Reject callers that do not own `activity`.
///
/// The message stays generic: a non-owner learns nothing about whether the
/// resource exists.
pub fn ensure_owner(activity: &Activity, user_id: DbId) -> Result<(), CoreError> {
    if activity.owner_id != user_id {
        tracing::warn!(
            activity_id = activity.id,
            user_id,
            "rejected non-owner mutation"
        );
        return Err(CoreError::Forbidden("not permitted".to_string()));
    }
    Ok(())
}
