//! Concert and reservation row models.
//!
//! Rows are converted into the domain types from `encore_core::concert`
//! once a concert's reservations have been loaded alongside it.

use encore_core::concert::{Concert, Reservation};
use encore_core::reservation::ReservationAction;
use encore_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `concerts` table.
#[derive(Debug, Clone, FromRow)]
pub struct ConcertRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub seat_capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `concert_reservations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: i64,
    pub concert_id: DbId,
    pub seq: i32,
    pub user_name: String,
    pub concert_name: String,
    pub action: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ReservationRow {
    /// Convert to the domain type. Unknown action strings are a schema violation.
    pub fn into_domain(self) -> Result<Reservation, sqlx::Error> {
        let action = ReservationAction::from_str_value(&self.action)
            .map_err(|msg| sqlx::Error::Decode(msg.into()))?;
        Ok(Reservation {
            user_name: self.user_name,
            concert_name: self.concert_name,
            action,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ConcertRow {
    /// Attach reservation rows (already ordered by `seq`) to build a concert.
    pub fn into_domain(self, reservations: Vec<ReservationRow>) -> Result<Concert, sqlx::Error> {
        let reservations = reservations
            .into_iter()
            .map(ReservationRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Concert {
            id: self.id,
            name: self.name,
            description: self.description,
            seat_capacity: self.seat_capacity,
            reservations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
