//! Storage collaborator interface.
//!
//! The reservation service reaches durable storage only through
//! [`ConcertStore`]. Implementations live in `encore_db`.

use async_trait::async_trait;

use crate::concert::{Concert, CreateConcert, NewReservation};
use crate::error::CoreError;
use crate::types::DbId;

/// Precondition checked against the freshest state of a concert, inside the
/// same atomic section as the append it guards.
pub type AppendGuard<'a> = dyn Fn(&Concert) -> Result<(), CoreError> + Send + Sync + 'a;

/// Durable storage of concerts and their embedded reservation lists.
///
/// Every method is a single atomic operation against the store. Native
/// store errors are reported as [`CoreError::Store`].
#[async_trait]
pub trait ConcertStore: Send + Sync {
    /// Parse a raw identifier in the store's native format.
    ///
    /// Synchronous and side-effect free; callers rely on it to reject
    /// malformed ids without a store round trip.
    fn parse_id(&self, raw: &str) -> Option<DbId> {
        DbId::try_parse(raw).ok()
    }

    /// Insert a concert with an empty reservation list.
    async fn insert(&self, input: &CreateConcert) -> Result<Concert, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Concert>, CoreError>;

    /// Atomically remove a concert and its reservations, returning what was removed.
    async fn delete_by_id(&self, id: DbId) -> Result<Option<Concert>, CoreError>;

    /// Append `entry` to the end of the concert's reservation list if `guard`
    /// accepts the current state.
    ///
    /// Reading the state, running `guard` and appending form one atomic step:
    /// no other append to the same concert can interleave. A guard error is
    /// returned unchanged and nothing is written. Returns the updated concert,
    /// or `None` if it does not exist.
    async fn append_reservation(
        &self,
        id: DbId,
        entry: &NewReservation,
        guard: &AppendGuard<'_>,
    ) -> Result<Option<Concert>, CoreError>;

    /// All concerts with their reservations, oldest first.
    async fn find_all(&self) -> Result<Vec<Concert>, CoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), CoreError>;
}
