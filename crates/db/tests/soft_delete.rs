//! Integration tests for activity soft-delete and restore behaviour.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Hidden activities disappear from the owner's list
//! - `find_by_id` and `find_by_pin` still resolve hidden activities, which
//!   is what the owner's restore path relies on
//! - Restoring flips the flag back without touching participants or scores

use sqlx::SqlitePool;
use tally_db::repositories::{ActivityRepo, ParticipantRepo, ScoreRepo, UserRepo};

async fn seed_activity(pool: &SqlitePool) -> (i64, i64) {
    let owner = UserRepo::insert(pool, "owner", "246813").await.unwrap();
    let activity = ActivityRepo::insert(pool, owner.id, "比賽", Some("春季"), "381940")
        .await
        .unwrap();
    (owner.id, activity.id)
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hidden_activity_leaves_owner_list(pool: SqlitePool) {
    let (owner_id, activity_id) = seed_activity(&pool).await;

    let before = ActivityRepo::list_by_owner(&pool, owner_id).await.unwrap();
    assert_eq!(before.len(), 1);

    let hidden = ActivityRepo::set_deleted(&pool, activity_id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(hidden.deleted);

    let after = ActivityRepo::list_by_owner(&pool, owner_id).await.unwrap();
    assert!(after.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hidden_activity_still_resolves_by_id_and_pin(pool: SqlitePool) {
    let (_, activity_id) = seed_activity(&pool).await;
    ActivityRepo::set_deleted(&pool, activity_id, true)
        .await
        .unwrap();

    let by_id = ActivityRepo::find_by_id(&pool, activity_id).await.unwrap();
    assert!(by_id.is_some(), "hidden activities must stay reachable by id");

    // The PIN stays reserved and resolvable while hidden.
    let by_pin = ActivityRepo::find_by_pin(&pool, "381940").await.unwrap();
    assert_eq!(by_pin.unwrap().id, activity_id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hide_restore_round_trip_preserves_data(pool: SqlitePool) {
    let (owner_id, activity_id) = seed_activity(&pool).await;
    let participant = ParticipantRepo::insert(&pool, activity_id, "張三")
        .await
        .unwrap();
    ScoreRepo::insert(&pool, participant.id, activity_id, 5, "回答問題")
        .await
        .unwrap();

    let hidden = ActivityRepo::set_deleted(&pool, activity_id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(hidden.deleted);

    let restored = ActivityRepo::set_deleted(&pool, activity_id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(!restored.deleted);
    assert_eq!(restored.pin, "381940");

    let roster = ParticipantRepo::list_by_activity(&pool, activity_id)
        .await
        .unwrap();
    assert_eq!(roster.len(), 1);
    let records = ScoreRepo::list_by_participant(&pool, participant.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);

    let listed = ActivityRepo::list_by_owner(&pool, owner_id).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_set_deleted_missing_activity_returns_none(pool: SqlitePool) {
    let updated = ActivityRepo::set_deleted(&pool, 9999, true).await.unwrap();
    assert!(updated.is_none());
}
