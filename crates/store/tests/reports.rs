//! Integration tests for roster import and the three CSV exports, driven
//! end-to-end through the store against a real database.

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use tally_core::csv::ReportKind;
use tally_core::error::CoreError;
use tally_db::models::activity::CreateActivity;
use tally_db::models::participant::CreateParticipant;
use tally_db::models::score::CreateScore;
use tally_db::models::user::CreateUser;
use tally_store::{activities, participants, reports, scores, users, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_activity(pool: &SqlitePool, name: &str) -> i64 {
    let owner = users::register(pool, &CreateUser { display_name: "owner".to_string() })
        .await
        .unwrap();
    activities::create(
        pool,
        owner.id,
        &CreateActivity { name: name.to_string(), description: None },
    )
    .await
    .unwrap()
    .id
}

async fn seed_participant(pool: &SqlitePool, activity_id: i64, name: &str) -> i64 {
    participants::create(
        pool,
        &CreateParticipant { activity_id, name: name.to_string() },
    )
    .await
    .unwrap()
    .id
}

async fn add_score(pool: &SqlitePool, participant_id: i64, points: i64, reason: &str) {
    scores::add(
        pool,
        &CreateScore { participant_id, points, reason: reason.to_string() },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Roster import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_import_roster_skips_header_and_duplicates(pool: SqlitePool) {
    let activity_id = seed_activity(&pool, "比賽").await;

    let import = reports::import_roster(&pool, activity_id, "姓名\n張三\n李四\n張三\n")
        .await
        .unwrap();
    assert_eq!(import.requested, 3);
    assert_eq!(import.created.len(), 2);
    assert_eq!(import.skipped(), 1);
    assert_eq!(import.created[0].name, "張三");
    assert_eq!(import.created[1].name, "李四");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_import_roster_skips_existing_participants(pool: SqlitePool) {
    let activity_id = seed_activity(&pool, "比賽").await;
    seed_participant(&pool, activity_id, "李四").await;

    let import = reports::import_roster(&pool, activity_id, "張三,A組\n李四,B組\n")
        .await
        .unwrap();
    assert_eq!(import.requested, 2);
    assert_eq!(import.created.len(), 1);
    assert_eq!(import.created[0].name, "張三");

    let roster = participants::list_for_activity(&pool, activity_id)
        .await
        .unwrap();
    assert_eq!(roster.len(), 2);
}

// ---------------------------------------------------------------------------
// Score list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_score_list_ranked_with_stable_ties(pool: SqlitePool) {
    let activity_id = seed_activity(&pool, "比賽").await;
    let a = seed_participant(&pool, activity_id, "A").await;
    let b = seed_participant(&pool, activity_id, "B").await;
    let c = seed_participant(&pool, activity_id, "C").await;

    add_score(&pool, a, 10, "加分").await;
    add_score(&pool, b, 30, "加分").await;
    add_score(&pool, c, 10, "加分").await;

    let csv = reports::score_list(&pool, activity_id).await.unwrap();
    // A and C tie on 10; A was added first and stays first.
    assert_eq!(csv, "參加者,總分\nB,30\nA,10\nC,10");
}

// ---------------------------------------------------------------------------
// Participant detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_participant_detail_placeholder_and_selection(pool: SqlitePool) {
    let activity_id = seed_activity(&pool, "比賽").await;
    let amy = seed_participant(&pool, activity_id, "Amy").await;
    let bob = seed_participant(&pool, activity_id, "Bob").await;

    add_score(&pool, amy, 5, "回答問題").await;
    add_score(&pool, amy, -2, "遲到").await;

    let csv = reports::participant_detail(&pool, activity_id, &[]).await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "參加者,時間,分數,原因");
    // Amy's two records, newest first.
    assert!(lines[1].starts_with("Amy,"));
    assert!(lines[1].ends_with(",-2,\"遲到\""));
    assert!(lines[2].ends_with(",5,\"回答問題\""));
    // Bob has no records and gets the placeholder row.
    assert_eq!(lines[3], "Bob,\"\",0,\"尚無分數記錄\"");
    assert_eq!(lines.len(), 4);

    // Selecting only Bob drops Amy's rows entirely.
    let csv = reports::participant_detail(&pool, activity_id, &[bob]).await.unwrap();
    assert_eq!(csv, "參加者,時間,分數,原因\nBob,\"\",0,\"尚無分數記錄\"");
}

// ---------------------------------------------------------------------------
// Time sequence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_time_sequence_lists_records_oldest_first(pool: SqlitePool) {
    let activity_id = seed_activity(&pool, "比賽").await;
    let amy = seed_participant(&pool, activity_id, "Amy").await;
    let bob = seed_participant(&pool, activity_id, "Bob").await;

    add_score(&pool, amy, 5, "第一筆").await;
    add_score(&pool, bob, 3, "第二筆").await;
    add_score(&pool, amy, -1, "第三筆").await;

    let csv = reports::time_sequence(&pool, activity_id).await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "時間,參加者,分數,原因");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].ends_with(",Amy,5,\"第一筆\""));
    assert!(lines[2].ends_with(",Bob,3,\"第二筆\""));
    assert!(lines[3].ends_with(",Amy,-1,\"第三筆\""));
}

// ---------------------------------------------------------------------------
// Export assembly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_export_adds_bom_and_filename(pool: SqlitePool) {
    let activity_id = seed_activity(&pool, "期末競賽").await;
    let amy = seed_participant(&pool, activity_id, "Amy").await;
    add_score(&pool, amy, 5, "加分").await;

    let export = reports::export(&pool, activity_id, ReportKind::ScoreList, &[])
        .await
        .unwrap();

    assert!(export.content.starts_with('\u{feff}'));
    assert_eq!(&export.content['\u{feff}'.len_utf8()..], "參加者,總分\nAmy,5");

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(export.filename, format!("期末競賽_分數名單表_{today}.csv"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_export_missing_activity(pool: SqlitePool) {
    let err = reports::export(&pool, 9999, ReportKind::TimeSequence, &[])
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::NotFound { .. }));
}
