//! Repository for the `concerts` and `concert_reservations` tables.

use std::collections::HashMap;

use encore_core::concert::{Concert, CreateConcert};
use encore_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::concert::{ConcertRow, ReservationRow};

/// Column list shared across concert queries.
const CONCERT_COLUMNS: &str = "id, name, description, seat_capacity, created_at, updated_at";

/// Column list shared across reservation queries.
const RESERVATION_COLUMNS: &str =
    "id, concert_id, seq, user_name, concert_name, action, created_at, updated_at";

/// Provides CRUD and reservation-append operations for concerts.
pub struct ConcertRepo;

impl ConcertRepo {
    /// Insert a new concert with a fresh UUIDv7 id, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateConcert) -> Result<Concert, sqlx::Error> {
        let query = format!(
            "INSERT INTO concerts (id, name, description, seat_capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING {CONCERT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ConcertRow>(&query)
            .bind(DbId::now_v7())
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.seat_capacity)
            .fetch_one(pool)
            .await?;
        row.into_domain(Vec::new())
    }

    /// Find a concert by id together with its ordered reservation list.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Concert>, sqlx::Error> {
        let query = format!("SELECT {CONCERT_COLUMNS} FROM concerts WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, ConcertRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let reservations = Self::reservations_for(pool, id).await?;
        row.into_domain(reservations).map(Some)
    }

    /// List all concerts, oldest first, each with its reservation list.
    pub async fn list(pool: &PgPool) -> Result<Vec<Concert>, sqlx::Error> {
        let query = format!("SELECT {CONCERT_COLUMNS} FROM concerts ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, ConcertRow>(&query)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT {RESERVATION_COLUMNS} FROM concert_reservations ORDER BY concert_id, seq"
        );
        let mut by_concert: HashMap<DbId, Vec<ReservationRow>> = HashMap::new();
        for r in sqlx::query_as::<_, ReservationRow>(&query)
            .fetch_all(pool)
            .await?
        {
            by_concert.entry(r.concert_id).or_default().push(r);
        }

        rows.into_iter()
            .map(|row| {
                let reservations = by_concert.remove(&row.id).unwrap_or_default();
                row.into_domain(reservations)
            })
            .collect()
    }

    /// Delete a concert and (via cascade) its reservations.
    ///
    /// The concert row is locked first so no reservation can be appended
    /// between reading the list and removing it. Returns the removed
    /// concert, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Concert>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if Self::lock_for_update(&mut *tx, id).await?.is_none() {
            return Ok(None);
        }
        let reservations = Self::reservations_for(&mut *tx, id).await?;

        let query = format!("DELETE FROM concerts WHERE id = $1 RETURNING {CONCERT_COLUMNS}");
        let row = sqlx::query_as::<_, ConcertRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        row.map(|r| r.into_domain(reservations)).transpose()
    }

    /// Fetch a concert row and hold a row lock on it until the surrounding
    /// transaction ends. Appends and deletes on the same concert serialize
    /// on this lock.
    pub async fn lock_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<ConcertRow>, sqlx::Error> {
        let query = format!("SELECT {CONCERT_COLUMNS} FROM concerts WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ConcertRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a reservation entry after the concert's current last entry.
    ///
    /// Callers must hold the lock from [`Self::lock_for_update`]; otherwise
    /// two inserts may pick the same `seq` and one fails on
    /// `uq_concert_reservations_concert_seq`.
    pub async fn insert_reservation<'e, E: PgExecutor<'e>>(
        executor: E,
        concert_id: DbId,
        user_name: &str,
        concert_name: &str,
        action: &str,
    ) -> Result<ReservationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO concert_reservations (concert_id, seq, user_name, concert_name, action)
             VALUES (
                 $1,
                 (SELECT COALESCE(MAX(seq) + 1, 0) FROM concert_reservations WHERE concert_id = $1),
                 $2, $3, $4
             )
             RETURNING {RESERVATION_COLUMNS}"
        );
        sqlx::query_as::<_, ReservationRow>(&query)
            .bind(concert_id)
            .bind(user_name)
            .bind(concert_name)
            .bind(action)
            .fetch_one(executor)
            .await
    }

    /// Reservation rows of one concert, in list order.
    pub async fn reservations_for<'e, E: PgExecutor<'e>>(
        executor: E,
        concert_id: DbId,
    ) -> Result<Vec<ReservationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {RESERVATION_COLUMNS} FROM concert_reservations
             WHERE concert_id = $1
             ORDER BY seq"
        );
        sqlx::query_as::<_, ReservationRow>(&query)
            .bind(concert_id)
            .fetch_all(executor)
            .await
    }
}
