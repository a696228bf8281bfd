//! Process-local [`ConcertStore`] for development and tests.
//!
//! Nothing is persisted. Every trait call bumps a counter so callers can
//! assert how many store round trips an operation made.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use encore_core::concert::{Concert, CreateConcert, NewReservation, Reservation};
use encore_core::error::CoreError;
use encore_core::store::{AppendGuard, ConcertStore};
use encore_core::types::DbId;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryConcertStore {
    concerts: RwLock<Vec<Concert>>,
    calls: AtomicUsize,
}

impl MemoryConcertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of async store operations served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConcertStore for MemoryConcertStore {
    async fn insert(&self, input: &CreateConcert) -> Result<Concert, CoreError> {
        self.record_call();
        let now = Utc::now();
        let concert = Concert {
            id: DbId::now_v7(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            seat_capacity: input.seat_capacity,
            reservations: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.concerts.write().await.push(concert.clone());
        Ok(concert)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Concert>, CoreError> {
        self.record_call();
        let concerts = self.concerts.read().await;
        Ok(concerts.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<Option<Concert>, CoreError> {
        self.record_call();
        let mut concerts = self.concerts.write().await;
        let removed = concerts
            .iter()
            .position(|c| c.id == id)
            .map(|idx| concerts.remove(idx));
        Ok(removed)
    }

    async fn append_reservation(
        &self,
        id: DbId,
        entry: &NewReservation,
        guard: &AppendGuard<'_>,
    ) -> Result<Option<Concert>, CoreError> {
        self.record_call();
        let mut concerts = self.concerts.write().await;
        let Some(concert) = concerts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        guard(&*concert)?;

        let now = Utc::now();
        concert.reservations.push(Reservation {
            user_name: entry.user_name.clone(),
            concert_name: concert.name.clone(),
            action: entry.action,
            created_at: now,
            updated_at: now,
        });
        Ok(Some(concert.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Concert>, CoreError> {
        self.record_call();
        Ok(self.concerts.read().await.clone())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.record_call();
        Ok(())
    }
}
