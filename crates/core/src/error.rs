use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Cancel was requested for a user without an active reservation.
    #[error("user not found: {user_name} has no active reservation")]
    ReservationNotFound { user_name: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The storage collaborator failed; the message is for logs only.
    #[error("Store error: {0}")]
    Store(String),
}
