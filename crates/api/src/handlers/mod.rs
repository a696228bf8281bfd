//! Request handlers.
//!
//! Handlers extract path/query/body values, delegate to the reservation
//! service in `AppState` and map errors via [`crate::error::AppError`].

pub mod concert;
pub mod reservation;
