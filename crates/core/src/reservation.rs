//! Reservation lifecycle rules.
//!
//! The state of a (concert, user) pair is derived from the concert's
//! reservation list: the most recent entry for that user wins. Later list
//! positions are more recent. All functions here are pure and operate on a
//! snapshot already loaded by the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::concert::Reservation;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ACTION_RESERVE: &str = "reserve";
pub const ACTION_CANCEL: &str = "cancel";

/// All valid action strings, as stored.
pub const VALID_ACTIONS: &[&str] = &[ACTION_RESERVE, ACTION_CANCEL];

pub const MSG_ALREADY_RESERVED: &str = "user already reserved";
pub const MSG_SEAT_FULL: &str = "seat is full";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The action recorded by a reservation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationAction {
    Reserve,
    Cancel,
}

impl ReservationAction {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ACTION_RESERVE => Ok(Self::Reserve),
            ACTION_CANCEL => Ok(Self::Cancel),
            _ => Err(format!(
                "Invalid reservation action '{s}'. Must be one of: {}",
                VALID_ACTIONS.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserve => ACTION_RESERVE,
            Self::Cancel => ACTION_CANCEL,
        }
    }
}

/// Lifecycle state of one user on one concert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationState {
    /// No entry exists for the user.
    None,
    /// The user's latest entry is a reserve.
    Active,
    /// The user's latest entry is a cancel.
    Cancelled,
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// Derive the state of `user_name` from a reservation list.
pub fn user_state(entries: &[Reservation], user_name: &str) -> ReservationState {
    match entries.iter().rev().find(|r| r.user_name == user_name) {
        None => ReservationState::None,
        Some(r) => match r.action {
            ReservationAction::Reserve => ReservationState::Active,
            ReservationAction::Cancel => ReservationState::Cancelled,
        },
    }
}

/// Number of users whose latest entry is a reserve.
pub fn active_count(entries: &[Reservation]) -> usize {
    let mut latest: HashMap<&str, ReservationAction> = HashMap::new();
    for entry in entries {
        latest.insert(entry.user_name.as_str(), entry.action);
    }
    latest
        .values()
        .filter(|a| **a == ReservationAction::Reserve)
        .count()
}

/// Whether the active reservations have used up every seat.
pub fn is_seat_full(entries: &[Reservation], seat_capacity: i32) -> bool {
    let capacity = usize::try_from(seat_capacity).unwrap_or(0);
    active_count(entries) >= capacity
}

// ---------------------------------------------------------------------------
// Transition guards
// ---------------------------------------------------------------------------

/// Check that `user_name` may reserve a seat.
///
/// The duplicate check runs before the capacity check, so an active user
/// on a full concert is told they already hold a seat.
pub fn check_reserve(
    entries: &[Reservation],
    seat_capacity: i32,
    user_name: &str,
) -> Result<(), CoreError> {
    if user_state(entries, user_name) == ReservationState::Active {
        return Err(CoreError::Conflict(MSG_ALREADY_RESERVED.into()));
    }
    if is_seat_full(entries, seat_capacity) {
        return Err(CoreError::Conflict(MSG_SEAT_FULL.into()));
    }
    Ok(())
}

/// Check that `user_name` holds an active reservation that can be cancelled.
pub fn check_cancel(entries: &[Reservation], user_name: &str) -> Result<(), CoreError> {
    match user_state(entries, user_name) {
        ReservationState::Active => Ok(()),
        ReservationState::None | ReservationState::Cancelled => {
            Err(CoreError::ReservationNotFound {
                user_name: user_name.to_string(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(user: &str, action: ReservationAction) -> Reservation {
        let now = Utc::now();
        Reservation {
            user_name: user.to_string(),
            concert_name: "Test Concert".to_string(),
            action,
            created_at: now,
            updated_at: now,
        }
    }

    fn reserve(user: &str) -> Reservation {
        entry(user, ReservationAction::Reserve)
    }

    fn cancel(user: &str) -> Reservation {
        entry(user, ReservationAction::Cancel)
    }

    #[test]
    fn action_round_trips_through_str() {
        for action in [ReservationAction::Reserve, ReservationAction::Cancel] {
            assert_eq!(
                ReservationAction::from_str_value(action.as_str()).unwrap(),
                action
            );
        }
        assert!(ReservationAction::from_str_value("hold").is_err());
    }

    #[test]
    fn state_none_without_entries() {
        assert_eq!(user_state(&[], "alice"), ReservationState::None);
        assert_eq!(
            user_state(&[reserve("bob")], "alice"),
            ReservationState::None
        );
    }

    #[test]
    fn latest_entry_wins() {
        let entries = vec![reserve("alice"), cancel("alice")];
        assert_eq!(user_state(&entries, "alice"), ReservationState::Cancelled);

        let entries = vec![reserve("alice"), cancel("alice"), reserve("alice")];
        assert_eq!(user_state(&entries, "alice"), ReservationState::Active);
    }

    #[test]
    fn active_count_ignores_cancelled_users() {
        let entries = vec![reserve("a"), reserve("b"), cancel("a")];
        assert_eq!(active_count(&entries), 1);
    }

    #[test]
    fn re_reservation_counts_once() {
        let entries = vec![reserve("a"), cancel("a"), reserve("a")];
        assert_eq!(active_count(&entries), 1);
    }

    #[test]
    fn seat_full_at_capacity() {
        let entries = vec![reserve("a"), reserve("b")];
        assert!(is_seat_full(&entries, 2));
        assert!(!is_seat_full(&entries, 3));

        let entries = vec![reserve("a"), reserve("b"), cancel("b")];
        assert!(!is_seat_full(&entries, 2));
    }

    #[test]
    fn reserve_rejects_active_user() {
        let err = check_reserve(&[reserve("alice")], 10, "alice").unwrap_err();
        assert!(matches!(err, CoreError::Conflict(msg) if msg == MSG_ALREADY_RESERVED));
    }

    #[test]
    fn reserve_rejects_when_full() {
        let entries = vec![reserve("user1"), reserve("user2")];
        let err = check_reserve(&entries, 2, "testuser").unwrap_err();
        assert!(matches!(err, CoreError::Conflict(msg) if msg == MSG_SEAT_FULL));
    }

    #[test]
    fn duplicate_check_precedes_capacity_check() {
        let entries = vec![reserve("alice")];
        let err = check_reserve(&entries, 1, "alice").unwrap_err();
        assert!(matches!(err, CoreError::Conflict(msg) if msg == MSG_ALREADY_RESERVED));
    }

    #[test]
    fn reserve_allowed_after_cancel() {
        let entries = vec![reserve("alice"), cancel("alice")];
        assert!(check_reserve(&entries, 1, "alice").is_ok());
    }

    #[test]
    fn cancel_requires_active_state() {
        assert!(check_cancel(&[reserve("alice")], "alice").is_ok());

        let err = check_cancel(&[], "alice").unwrap_err();
        assert!(matches!(err, CoreError::ReservationNotFound { .. }));

        let err = check_cancel(&[reserve("alice"), cancel("alice")], "alice").unwrap_err();
        assert!(matches!(err, CoreError::ReservationNotFound { .. }));
    }
}
