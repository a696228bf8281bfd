//! Shared response envelope types for API handlers.
//!
//! Resource payloads use a `{ "data": ... }` envelope. Reservation actions
//! and deletes answer with a short `{ "message": ... }` acknowledgement.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "user": ... }` acknowledgement.
///
/// `user` is omitted when the action is not tied to a user.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            user: None,
        }
    }

    pub fn for_user(message: &'static str, user: String) -> Self {
        Self {
            message,
            user: Some(user),
        }
    }
}
