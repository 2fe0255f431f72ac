//! Activity entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// An activity row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// 6-digit join code, unique across all activities, hidden or not.
    /// Immutable after creation.
    pub pin: String,
    pub owner_id: DbId,
    /// Soft-delete flag: a hidden activity disappears from its owner's list
    /// but keeps its data and its PIN reservation.
    pub deleted: bool,
    pub created_at: Timestamp,
}

/// DTO for creating an activity. PIN and owner are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for editing an activity. Name and description are overwritten as a
/// pair; PIN and owner are immutable post-creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActivity {
    pub name: String,
    pub description: Option<String>,
}
