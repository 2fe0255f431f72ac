//! Membership link model: a user joined an activity they do not own.

use serde::Serialize;
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// A membership row from the `memberships` table. At most one link exists
/// per (user, activity) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub user_id: DbId,
    pub activity_id: DbId,
    pub joined_at: Timestamp,
}
