//! Score aggregation without per-participant re-queries.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tally_core::types::DbId;
use tally_db::models::participant::ParticipantWithTotal;
use tally_db::repositories::{ParticipantRepo, ScoreRepo};

use crate::error::StoreResult;

/// Sum of one participant's points; 0 when they have no records.
pub async fn total_for_participant(
    pool: &SqlitePool,
    participant_id: DbId,
) -> StoreResult<i64> {
    Ok(ScoreRepo::sum_for_participant(pool, participant_id).await?)
}

/// Totals for every participant of an activity, in participant insertion
/// order.
///
/// The participant list and the activity's full score log are fetched
/// concurrently, the log is folded into per-participant sums in one pass,
/// and the sums are merged onto the list (no records means a total of 0).
/// Re-querying per participant would cost O(participants x records) round
/// trips and is exactly what this fold avoids.
pub async fn totals_for_activity(
    pool: &SqlitePool,
    activity_id: DbId,
) -> StoreResult<Vec<ParticipantWithTotal>> {
    let (participants, records) = tokio::try_join!(
        ParticipantRepo::list_by_activity(pool, activity_id),
        ScoreRepo::list_by_activity(pool, activity_id),
    )?;

    let mut sums: HashMap<DbId, i64> = HashMap::new();
    for record in &records {
        *sums.entry(record.participant_id).or_insert(0) += record.points;
    }

    Ok(participants
        .into_iter()
        .map(|p| ParticipantWithTotal {
            total_score: sums.get(&p.id).copied().unwrap_or(0),
            id: p.id,
            activity_id: p.activity_id,
            name: p.name,
        })
        .collect())
}
