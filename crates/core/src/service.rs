//! Reservation engine.
//!
//! Validates identifiers and user names, then hands the lifecycle guards
//! from [`crate::reservation`] to the [`ConcertStore`], which runs them
//! atomically with the append. Holds no mutable state of its own, so any
//! number of instances may run against the same store.

use std::sync::Arc;

use crate::concert::{
    normalize_user_name, validate_create_concert, Concert, CreateConcert, NewReservation,
};
use crate::error::CoreError;
use crate::reservation::{active_count, check_cancel, check_reserve, ReservationAction};
use crate::store::{AppendGuard, ConcertStore};
use crate::types::DbId;
use crate::views::{listings, reservation_report, ConcertListing, ReservationReport};

const ENTITY: &str = "Concert";

pub struct ReservationService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for ReservationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ConcertStore + ?Sized> ReservationService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store, for health probes.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reject malformed identifiers before any store access.
    pub fn parse_id(&self, raw: &str) -> Result<DbId, CoreError> {
        self.store
            .parse_id(raw)
            .ok_or_else(|| CoreError::Validation(format!("invalid concert id '{raw}'")))
    }

    pub async fn create_concert(&self, input: &CreateConcert) -> Result<Concert, CoreError> {
        validate_create_concert(input)?;
        let concert = self.store.insert(input).await?;
        tracing::info!(
            concert_id = %concert.id,
            seat_capacity = concert.seat_capacity,
            "Concert created",
        );
        Ok(concert)
    }

    /// List every concert with its availability flags for `user_name`.
    pub async fn list_concerts(
        &self,
        user_name: Option<&str>,
    ) -> Result<Vec<ConcertListing>, CoreError> {
        let concerts = self.store.find_all().await?;
        Ok(listings(&concerts, user_name))
    }

    pub async fn get_concert(&self, raw_id: &str) -> Result<Concert, CoreError> {
        let id = self.parse_id(raw_id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    pub async fn delete_concert(&self, raw_id: &str) -> Result<Concert, CoreError> {
        let id = self.parse_id(raw_id)?;
        let removed = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::info!(
            concert_id = %id,
            reservations = removed.reservations.len(),
            "Concert deleted",
        );
        Ok(removed)
    }

    /// Reserve a seat for `user_name`, returning the normalized user name.
    pub async fn reserve_seat(&self, raw_id: &str, user_name: &str) -> Result<String, CoreError> {
        let id = self.parse_id(raw_id)?;
        let user_name = normalize_user_name(user_name)?;

        let guard = |concert: &Concert| {
            check_reserve(&concert.reservations, concert.seat_capacity, &user_name)
        };
        let concert = self
            .append(id, &user_name, ReservationAction::Reserve, &guard)
            .await?;

        tracing::info!(
            concert_id = %id,
            user_name = %user_name,
            active = active_count(&concert.reservations),
            capacity = concert.seat_capacity,
            "Seat reserved",
        );
        Ok(user_name)
    }

    /// Cancel the active reservation of `user_name`, returning the normalized user name.
    pub async fn cancel_reservation(
        &self,
        raw_id: &str,
        user_name: &str,
    ) -> Result<String, CoreError> {
        let id = self.parse_id(raw_id)?;
        let user_name = normalize_user_name(user_name)?;

        let guard = |concert: &Concert| check_cancel(&concert.reservations, &user_name);
        let concert = self
            .append(id, &user_name, ReservationAction::Cancel, &guard)
            .await?;

        tracing::info!(
            concert_id = %id,
            user_name = %user_name,
            active = active_count(&concert.reservations),
            "Reservation cancelled",
        );
        Ok(user_name)
    }

    /// Every reservation entry across all concerts, for auditing.
    pub async fn reservation_report(&self) -> Result<ReservationReport, CoreError> {
        let concerts = self.store.find_all().await?;
        Ok(reservation_report(&concerts))
    }

    async fn append(
        &self,
        id: DbId,
        user_name: &str,
        action: ReservationAction,
        guard: &AppendGuard<'_>,
    ) -> Result<Concert, CoreError> {
        let entry = NewReservation {
            user_name: user_name.to_string(),
            action,
        };
        match self.store.append_reservation(id, &entry, guard).await {
            Ok(Some(concert)) => Ok(concert),
            Ok(None) => Err(CoreError::NotFound { entity: ENTITY, id }),
            Err(err) => {
                tracing::debug!(
                    concert_id = %id,
                    user_name = %user_name,
                    action = action.as_str(),
                    error = %err,
                    "Reservation rejected",
                );
                Err(err)
            }
        }
    }
}
