//! Integration tests for the user store port.
//!
//! These tests drive a full visit through `Arc<dyn UserRepository>`:
//! 1. A user registers with a number of prepaid entries
//! 2. Entering spends an entry and bumps the total entry count
//! 3. Leaving adds the measured stay to the total stay time
//!
//! Uses the in-memory adapter so no database is needed.

use chrono::Duration;
use std::collections::HashSet;
use std::sync::Arc;

use entrance_system::adapters::InMemoryUserRepository;
use entrance_system::domain::foundation::{DomainError, ErrorCode, Timestamp};
use entrance_system::domain::user::{EntryCountChange, NewUser, StayTime};
use entrance_system::ports::UserRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn store() -> Arc<dyn UserRepository> {
    Arc::new(InMemoryUserRepository::new())
}

/// Entry as a front desk would perform it.
async fn enter(repo: &dyn UserRepository, barcode: &str) -> Result<EntryCountChange, DomainError> {
    let user = repo.find_by_barcode(barcode).await?;
    let change = repo.decrease_remaining_entries(user.id, 1).await?;
    repo.increase_total_entries(user.id).await?;
    Ok(change)
}

// =============================================================================
// Integration Tests
// =============================================================================

#[tokio::test]
async fn visit_moves_every_counter() {
    let repo = store();
    let user = repo
        .create(&NewUser::new("Hanako", "JH-0100").with_remaining_entries(3))
        .await
        .unwrap();

    let entered_at = Timestamp::now();
    let change = enter(repo.as_ref(), "JH-0100").await.unwrap();
    let left_at = Timestamp::from_datetime(*entered_at.as_datetime() + Duration::seconds(95 * 60 + 10));
    repo.add_total_stay_time(user.id, left_at.duration_since(&entered_at))
        .await
        .unwrap();

    assert_eq!(change, EntryCountChange::new(3, 2));

    let reloaded = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(reloaded.remaining_entries, 2);
    assert_eq!(reloaded.total_entries, 1);
    assert_eq!(reloaded.total_stay_time, StayTime::from_minutes(96));
}

#[tokio::test]
async fn entries_can_run_into_debt_and_be_topped_up() {
    let repo = store();
    let user = repo.create(&NewUser::new("Taro", "JH-0101")).await.unwrap();

    let first = enter(repo.as_ref(), "JH-0101").await.unwrap();
    let top_up = repo.increase_remaining_entries(user.id, 10).await.unwrap();

    assert_eq!(first, EntryCountChange::new(0, -1));
    assert!(first.is_overdrawn());
    assert_eq!(top_up, EntryCountChange::new(-1, 9));
}

#[tokio::test]
async fn unknown_barcode_is_a_plain_database_error() {
    let repo = store();

    let err = enter(repo.as_ref(), "missing").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::DatabaseError);
}

#[tokio::test]
async fn concurrent_entries_see_distinct_before_values() {
    let repo = store();
    let user = repo
        .create(&NewUser::new("Crowd", "JH-0102").with_remaining_entries(50))
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let repo = Arc::clone(&repo);
        tasks.push(tokio::spawn(async move {
            repo.decrease_remaining_entries(user.id, 1).await.unwrap()
        }));
    }

    let mut befores = HashSet::new();
    for task in tasks {
        let change = task.await.unwrap();
        assert_eq!(change.after, change.before - 1);
        assert!(befores.insert(change.before));
    }

    assert_eq!(befores.len(), 20);
    assert_eq!(repo.find_by_id(user.id).await.unwrap().remaining_entries, 30);
}

#[tokio::test]
async fn deleted_user_can_no_longer_enter() {
    let repo = store();
    let user = repo
        .create(&NewUser::new("Gone", "JH-0103").with_remaining_entries(5))
        .await
        .unwrap();

    repo.delete(user.id).await.unwrap();

    assert!(enter(repo.as_ref(), "JH-0103").await.is_err());
    assert!(repo.decrease_remaining_entries(user.id, 1).await.is_err());
}
