//! Concert and reservation domain types plus request validation.
//!
//! A concert owns an ordered list of reservation entries. Insertion order is
//! chronological order; the list is append-only.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::reservation::ReservationAction;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a user name attached to a reservation.
pub const MAX_USER_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A concert together with its full reservation history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concert {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub seat_capacity: i32,
    pub reservations: Vec<Reservation>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Concert {
    /// Position the next appended reservation entry will occupy.
    ///
    /// Stores use this as the expected list length for conditional appends.
    pub fn next_seq(&self) -> i32 {
        self.reservations.len() as i32
    }
}

/// One RESERVE or CANCEL action recorded against a concert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub user_name: String,
    /// Concert name at the time the action was recorded.
    pub concert_name: String,
    pub action: ReservationAction,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A reservation entry about to be appended by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_name: String,
    pub action: ReservationAction,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// DTO for creating a concert.
///
/// `seat` is accepted as an alias of `seat_capacity`. Names are capped at
/// 200 characters.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConcert {
    #[validate(length(min = 1, max = 200, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(alias = "seat")]
    #[validate(range(min = 1, message = "seat_capacity must be a positive integer"))]
    pub seat_capacity: i32,
}

/// Body of reserve and cancel requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationRequest {
    pub user_name: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a create request, rejecting blank names and non-positive capacity.
pub fn validate_create_concert(input: &CreateConcert) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    Ok(())
}

/// Trim a user name and reject it if empty or too long.
pub fn normalize_user_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("user_name is required".into()));
    }
    if name.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "user_name must be at most {MAX_USER_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}
