//! Report orchestration: roster import and the three CSV exports.
//!
//! This module wires the database reads to the pure formatters in
//! `tally-core::csv`. Independent reads run concurrently; each export is a
//! single bulk fetch of the activity's score log, never a per-participant
//! re-query.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tally_core::csv::{
    export_filename, parse_roster, participant_detail_csv, score_list_csv, time_sequence_csv,
    with_bom, ReportKind, ScoreEntry, ScoreListRow, SequenceRow, UNKNOWN_PARTICIPANT,
};
use tally_core::error::CoreError;
use tally_core::types::DbId;
use tally_db::models::participant::Participant;
use tally_db::repositories::{ActivityRepo, ParticipantRepo, ScoreRepo};

use crate::error::{StoreError, StoreResult};
use crate::{participants, scoreboard};

/// Outcome of a roster import. The skip count is
/// `requested - created.len()`: blank lines never reach the batch, so every
/// skip is a duplicate.
#[derive(Debug)]
pub struct RosterImport {
    /// Names the parser extracted from the file.
    pub requested: usize,
    /// Participants actually inserted, in file order.
    pub created: Vec<Participant>,
}

impl RosterImport {
    pub fn skipped(&self) -> usize {
        self.requested - self.created.len()
    }
}

/// A BOM-prefixed CSV payload with its download filename.
#[derive(Debug)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Parse roster text and batch-create the named participants.
pub async fn import_roster(
    pool: &SqlitePool,
    activity_id: DbId,
    text: &str,
) -> StoreResult<RosterImport> {
    let names = parse_roster(text);
    let created = participants::create_batch(pool, activity_id, &names).await?;
    tracing::info!(
        activity_id,
        requested = names.len(),
        created = created.len(),
        "imported roster"
    );
    Ok(RosterImport {
        requested: names.len(),
        created,
    })
}

/// Score-list CSV: one row per participant with their total, descending.
pub async fn score_list(pool: &SqlitePool, activity_id: DbId) -> StoreResult<String> {
    let totals = scoreboard::totals_for_activity(pool, activity_id).await?;
    let rows: Vec<ScoreListRow> = totals
        .into_iter()
        .map(|p| ScoreListRow {
            name: p.name,
            total: p.total_score,
        })
        .collect();
    Ok(score_list_csv(&rows))
}

/// Participant-detail CSV for the chosen participants, or for all of them
/// when `participant_ids` is empty. Records are listed newest first per
/// participant, matching the history view; a participant without records
/// still gets their placeholder row.
pub async fn participant_detail(
    pool: &SqlitePool,
    activity_id: DbId,
    participant_ids: &[DbId],
) -> StoreResult<String> {
    let (roster, records) = tokio::try_join!(
        ParticipantRepo::list_by_activity(pool, activity_id),
        ScoreRepo::list_by_activity(pool, activity_id),
    )?;

    let mut by_participant: HashMap<DbId, Vec<ScoreEntry>> = HashMap::new();
    for record in records {
        by_participant
            .entry(record.participant_id)
            .or_default()
            .push(ScoreEntry {
                at: record.created_at,
                points: record.points,
                reason: record.reason,
            });
    }

    let mut entries = Vec::new();
    for participant in roster {
        if !participant_ids.is_empty() && !participant_ids.contains(&participant.id) {
            continue;
        }
        let mut history = by_participant.remove(&participant.id).unwrap_or_default();
        // The bulk read is oldest-first; the detail view shows newest first.
        history.reverse();
        entries.push((participant.name, history));
    }

    Ok(participant_detail_csv(&entries))
}

/// Time-sequence CSV: every record of the activity, oldest first, with the
/// participant name resolved via one lookup map.
pub async fn time_sequence(pool: &SqlitePool, activity_id: DbId) -> StoreResult<String> {
    let (roster, records) = tokio::try_join!(
        ParticipantRepo::list_by_activity(pool, activity_id),
        ScoreRepo::list_by_activity(pool, activity_id),
    )?;

    let names: HashMap<DbId, String> =
        roster.into_iter().map(|p| (p.id, p.name)).collect();

    let rows: Vec<SequenceRow> = records
        .into_iter()
        .map(|record| SequenceRow {
            at: record.created_at,
            participant: names
                .get(&record.participant_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string()),
            points: record.points,
            reason: record.reason,
        })
        .collect();

    Ok(time_sequence_csv(&rows))
}

/// Assemble a downloadable export: BOM-prefixed content plus the
/// `{activity}_{label}_{date}.csv` filename. `participant_ids` only applies
/// to the participant-detail format.
pub async fn export(
    pool: &SqlitePool,
    activity_id: DbId,
    kind: ReportKind,
    participant_ids: &[DbId],
) -> StoreResult<CsvExport> {
    let activity = ActivityRepo::find_by_id(pool, activity_id)
        .await?
        .ok_or(StoreError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    let content = match kind {
        ReportKind::ScoreList => score_list(pool, activity_id).await?,
        ReportKind::ParticipantDetail => {
            participant_detail(pool, activity_id, participant_ids).await?
        }
        ReportKind::TimeSequence => time_sequence(pool, activity_id).await?,
    };

    Ok(CsvExport {
        filename: export_filename(&activity.name, kind, chrono::Utc::now()),
        content: with_bom(&content),
    })
}
