//! Score record entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// A score record row from the `scores` table: one signed point adjustment
/// with a reason and a creation timestamp.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoreRecord {
    pub id: DbId,
    pub participant_id: DbId,
    /// Denormalized copy of the owning participant's activity, set once at
    /// insert and never updated afterwards.
    pub activity_id: DbId,
    pub points: i64,
    pub reason: String,
    pub created_at: Timestamp,
}

/// DTO for recording a point adjustment. The activity is derived from the
/// participant at insert time.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScore {
    pub participant_id: DbId,
    pub points: i64,
    pub reason: String,
}

/// DTO for editing a score record in place. The creation timestamp is
/// deliberately not editable: edits do not re-order history.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScore {
    pub points: i64,
    pub reason: String,
}
