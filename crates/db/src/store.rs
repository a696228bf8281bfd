//! PostgreSQL-backed [`ConcertStore`].

use async_trait::async_trait;
use encore_core::concert::{Concert, CreateConcert, NewReservation};
use encore_core::error::CoreError;
use encore_core::store::{AppendGuard, ConcertStore};
use encore_core::types::DbId;

use crate::repositories::ConcertRepo;
use crate::DbPool;

/// Adapts [`ConcertRepo`] to the store interface used by the reservation engine.
#[derive(Clone)]
pub struct PgConcertStore {
    pool: DbPool,
}

impl PgConcertStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Log a database failure and convert it to a store error.
fn store_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Concert store query failed");
    CoreError::Store(err.to_string())
}

#[async_trait]
impl ConcertStore for PgConcertStore {
    async fn insert(&self, input: &CreateConcert) -> Result<Concert, CoreError> {
        ConcertRepo::create(&self.pool, input)
            .await
            .map_err(store_error)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Concert>, CoreError> {
        ConcertRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<Option<Concert>, CoreError> {
        ConcertRepo::delete(&self.pool, id).await.map_err(store_error)
    }

    async fn append_reservation(
        &self,
        id: DbId,
        entry: &NewReservation,
        guard: &AppendGuard<'_>,
    ) -> Result<Option<Concert>, CoreError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let Some(row) = ConcertRepo::lock_for_update(&mut *tx, id)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };
        let reservations = ConcertRepo::reservations_for(&mut *tx, id)
            .await
            .map_err(store_error)?;
        let mut concert = row.into_domain(reservations).map_err(store_error)?;

        // Dropping `tx` on a guard error rolls back and releases the lock.
        guard(&concert)?;

        let inserted = ConcertRepo::insert_reservation(
            &mut *tx,
            id,
            &entry.user_name,
            &concert.name,
            entry.action.as_str(),
        )
        .await
        .map_err(store_error)?;
        tx.commit().await.map_err(store_error)?;

        concert
            .reservations
            .push(inserted.into_domain().map_err(store_error)?);
        Ok(Some(concert))
    }

    async fn find_all(&self) -> Result<Vec<Concert>, CoreError> {
        ConcertRepo::list(&self.pool).await.map_err(store_error)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}
