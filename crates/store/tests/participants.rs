//! Integration tests for participant management: duplicate names, batch
//! creation, rename rules, and the cascading delete.

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use tally_core::error::CoreError;
use tally_db::models::activity::CreateActivity;
use tally_db::models::participant::CreateParticipant;
use tally_db::models::score::CreateScore;
use tally_db::models::user::CreateUser;
use tally_store::{activities, participants, scores, users, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_activity(pool: &SqlitePool) -> i64 {
    let owner = users::register(pool, &CreateUser { display_name: "owner".to_string() })
        .await
        .unwrap();
    activities::create(
        pool,
        owner.id,
        &CreateActivity { name: "比賽".to_string(), description: None },
    )
    .await
    .unwrap()
    .id
}

fn named(activity_id: i64, name: &str) -> CreateParticipant {
    CreateParticipant {
        activity_id,
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Single create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_trims_name(pool: SqlitePool) {
    let activity_id = seed_activity(&pool).await;
    let participant = participants::create(&pool, &named(activity_id, "  張三  "))
        .await
        .unwrap();
    assert_eq!(participant.name, "張三");
    assert_eq!(participant.activity_id, activity_id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_rejects_case_insensitive_duplicate(pool: SqlitePool) {
    let activity_id = seed_activity(&pool).await;
    participants::create(&pool, &named(activity_id, "Amy")).await.unwrap();

    let err = participants::create(&pool, &named(activity_id, " amy "))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Duplicate { .. }));

    // Only the first insert landed.
    let roster = participants::list_for_activity(&pool, activity_id)
        .await
        .unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "Amy");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_rejects_blank_name_and_missing_activity(pool: SqlitePool) {
    let activity_id = seed_activity(&pool).await;

    let err = participants::create(&pool, &named(activity_id, "   "))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));

    let err = participants::create(&pool, &named(9999, "張三"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Batch create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_batch_skips_duplicates_first_wins(pool: SqlitePool) {
    let activity_id = seed_activity(&pool).await;
    participants::create(&pool, &named(activity_id, "王五")).await.unwrap();

    let names: Vec<String> = ["張三", "李四", " 張三 ", "王五", "Amy", "AMY"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let created = participants::create_batch(&pool, activity_id, &names)
        .await
        .unwrap();

    let created_names: Vec<&str> = created.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(created_names, ["張三", "李四", "Amy"]);

    let roster = participants::list_for_activity(&pool, activity_id)
        .await
        .unwrap();
    assert_eq!(roster.len(), 4);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_batch_missing_activity(pool: SqlitePool) {
    let err = participants::create_batch(&pool, 9999, &["張三".to_string()])
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_rename_collision_and_self(pool: SqlitePool) {
    let activity_id = seed_activity(&pool).await;
    let amy = participants::create(&pool, &named(activity_id, "Amy")).await.unwrap();
    participants::create(&pool, &named(activity_id, "Bob")).await.unwrap();

    let err = participants::rename(&pool, amy.id, "bob").await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Duplicate { .. }));

    // Re-casing their own name is not a collision.
    let renamed = participants::rename(&pool, amy.id, "AMY").await.unwrap();
    assert_eq!(renamed.name, "AMY");

    let err = participants::rename(&pool, 9999, "Carol").await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_removes_participant_and_scores(pool: SqlitePool) {
    let activity_id = seed_activity(&pool).await;
    let doomed = participants::create(&pool, &named(activity_id, "張三")).await.unwrap();
    let kept = participants::create(&pool, &named(activity_id, "李四")).await.unwrap();

    for points in [3, -1, 4] {
        scores::add(
            &pool,
            &CreateScore { participant_id: doomed.id, points, reason: "調整".to_string() },
        )
        .await
        .unwrap();
    }
    scores::add(
        &pool,
        &CreateScore { participant_id: kept.id, points: 10, reason: "表現佳".to_string() },
    )
    .await
    .unwrap();

    participants::delete(&pool, doomed.id).await.unwrap();

    assert!(participants::get(&pool, doomed.id).await.unwrap().is_none());
    assert!(scores::list_for_participant(&pool, doomed.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        scores::list_for_participant(&pool, kept.id).await.unwrap().len(),
        1
    );

    let err = participants::delete(&pool, doomed.id).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::NotFound { .. }));
}
