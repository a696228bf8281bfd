//! Integration tests for `ConcertRepo` and `PgConcertStore` against a real
//! database.
//!
//! Exercises:
//! - Create and lookup
//! - Capacity check constraint
//! - Cascade delete of reservation entries
//! - Guarded appends under the concert row lock

use encore_core::concert::{Concert, CreateConcert, NewReservation};
use encore_core::error::CoreError;
use encore_core::reservation::{check_reserve, ReservationAction};
use encore_core::store::ConcertStore;
use encore_db::repositories::ConcertRepo;
use encore_db::PgConcertStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn accept(_: &Concert) -> Result<(), CoreError> {
    Ok(())
}

fn entry(user: &str, action: ReservationAction) -> NewReservation {
    NewReservation {
        user_name: user.to_string(),
        action,
    }
}

fn new_concert(name: &str, seat_capacity: i32) -> CreateConcert {
    CreateConcert {
        name: name.to_string(),
        description: Some("Test Description".to_string()),
        seat_capacity,
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_concert(pool: PgPool) {
    let created = ConcertRepo::create(&pool, &new_concert("Test Concert", 10))
        .await
        .unwrap();
    assert_eq!(created.name, "Test Concert");
    assert!(created.reservations.is_empty());

    let found = ConcertRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("concert should exist");
    assert_eq!(found.id, created.id);
    assert_eq!(found.seat_capacity, 10);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_zero_capacity_violates_check(pool: PgPool) {
    let result = ConcertRepo::create(&pool, &new_concert("Empty", 0)).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_cascades_reservations(pool: PgPool) {
    let store = PgConcertStore::new(pool.clone());
    let concert = store.insert(&new_concert("Gone", 2)).await.unwrap();
    store
        .append_reservation(concert.id, &entry("alice", ReservationAction::Reserve), &accept)
        .await
        .unwrap()
        .expect("append should land");

    let removed = ConcertRepo::delete(&pool, concert.id)
        .await
        .unwrap()
        .expect("concert should be removed");
    assert_eq!(removed.reservations.len(), 1);

    let (remaining,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM concert_reservations WHERE concert_id = $1",
    )
    .bind(concert.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 0);

    assert!(ConcertRepo::delete(&pool, concert.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_orders_reservations_by_seq(pool: PgPool) {
    let store = PgConcertStore::new(pool.clone());
    let concert = store.insert(&new_concert("Ordered", 5)).await.unwrap();
    store
        .append_reservation(concert.id, &entry("alice", ReservationAction::Reserve), &accept)
        .await
        .unwrap();
    store
        .append_reservation(concert.id, &entry("alice", ReservationAction::Cancel), &accept)
        .await
        .unwrap();

    let all = ConcertRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    let actions: Vec<_> = all[0].reservations.iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![ReservationAction::Reserve, ReservationAction::Cancel]
    );
}

// ---------------------------------------------------------------------------
// Guarded append
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_append_returns_updated_concert(pool: PgPool) {
    let store = PgConcertStore::new(pool.clone());
    let concert = store.insert(&new_concert("Appended", 3)).await.unwrap();

    let updated = store
        .append_reservation(concert.id, &entry("alice", ReservationAction::Reserve), &accept)
        .await
        .unwrap()
        .expect("concert should exist");
    assert_eq!(updated.reservations.len(), 1);
    assert_eq!(updated.reservations[0].concert_name, "Appended");

    let reloaded = store.find_by_id(concert.id).await.unwrap().unwrap();
    assert_eq!(reloaded, updated);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rejected_guard_writes_nothing(pool: PgPool) {
    let store = PgConcertStore::new(pool.clone());
    let concert = store.insert(&new_concert("Single", 1)).await.unwrap();
    let seat_guard = |c: &Concert| check_reserve(&c.reservations, c.seat_capacity, "bob");

    store
        .append_reservation(concert.id, &entry("alice", ReservationAction::Reserve), &accept)
        .await
        .unwrap();
    let result = store
        .append_reservation(concert.id, &entry("bob", ReservationAction::Reserve), &seat_guard)
        .await;
    assert!(matches!(result, Err(CoreError::Conflict(ref msg)) if msg == "seat is full"));

    let stored = store.find_by_id(concert.id).await.unwrap().unwrap();
    assert_eq!(stored.reservations.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_append_to_missing_concert(pool: PgPool) {
    let store = PgConcertStore::new(pool);
    let missing = store
        .append_reservation(
            uuid::Uuid::now_v7(),
            &entry("alice", ReservationAction::Reserve),
            &accept,
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_appends_all_land(pool: PgPool) {
    let store = std::sync::Arc::new(PgConcertStore::new(pool));
    let concert = store.insert(&new_concert("Busy", 100)).await.unwrap();

    let mut handles = Vec::new();
    for n in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .append_reservation(
                    concert.id,
                    &entry(&format!("user{n}"), ReservationAction::Reserve),
                    &accept,
                )
                .await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    let stored = store.find_by_id(concert.id).await.unwrap().unwrap();
    assert_eq!(stored.reservations.len(), 20);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_store_ping(pool: PgPool) {
    let store = PgConcertStore::new(pool);
    store.ping().await.unwrap();
}
