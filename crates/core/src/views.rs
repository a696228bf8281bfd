//! Read-only projections over concerts, computed on demand.

use serde::Serialize;

use crate::concert::Concert;
use crate::reservation::{is_seat_full, user_state, ReservationAction, ReservationState};
use crate::types::{DbId, Timestamp};

/// A concert as shown in listings: public attributes plus derived flags.
///
/// The raw reservation list is deliberately absent.
#[derive(Debug, Clone, Serialize)]
pub struct ConcertListing {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub seat_capacity: i32,
    pub is_user_reserved: bool,
    pub is_seat_full: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One flattened row of the global reservation report.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationRecord {
    pub concert_id: DbId,
    pub concert_name: String,
    pub seat: i32,
    pub user_name: String,
    pub action: ReservationAction,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Every reservation entry across all concerts, including cancellations.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationReport {
    pub total_reservations: usize,
    pub reservations: Vec<ReservationRecord>,
}

/// Project a concert for a listing, relative to an optional requesting user.
///
/// A blank user name is treated as absent.
pub fn listing(concert: &Concert, user_name: Option<&str>) -> ConcertListing {
    let is_user_reserved = user_name
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|u| user_state(&concert.reservations, u) == ReservationState::Active)
        .unwrap_or(false);

    ConcertListing {
        id: concert.id,
        name: concert.name.clone(),
        description: concert.description.clone(),
        seat_capacity: concert.seat_capacity,
        is_user_reserved,
        is_seat_full: is_seat_full(&concert.reservations, concert.seat_capacity),
        created_at: concert.created_at,
        updated_at: concert.updated_at,
    }
}

pub fn listings(concerts: &[Concert], user_name: Option<&str>) -> Vec<ConcertListing> {
    concerts.iter().map(|c| listing(c, user_name)).collect()
}

/// Flatten every concert's reservation list, preserving concert order and
/// each list's chronological order.
pub fn reservation_report(concerts: &[Concert]) -> ReservationReport {
    let reservations: Vec<ReservationRecord> = concerts
        .iter()
        .flat_map(|concert| {
            concert.reservations.iter().map(move |r| ReservationRecord {
                concert_id: concert.id,
                concert_name: concert.name.clone(),
                seat: concert.seat_capacity,
                user_name: r.user_name.clone(),
                action: r.action,
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
        })
        .collect();

    ReservationReport {
        total_reservations: reservations.len(),
        reservations,
    }
}
