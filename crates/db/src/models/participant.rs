//! Participant entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::DbId;

/// A participant row from the `participants` table. A participant belongs
/// to exactly one activity; the name is unique within it, case-insensitively.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub activity_id: DbId,
    pub name: String,
}

/// DTO for adding a participant to an activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipant {
    pub activity_id: DbId,
    pub name: String,
}

/// A participant merged with their aggregated score total.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantWithTotal {
    pub id: DbId,
    pub activity_id: DbId,
    pub name: String,
    pub total_score: i64,
}
