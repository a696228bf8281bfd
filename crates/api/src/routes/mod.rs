pub mod concert;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /concerts                          list (?user_name=), create
/// /concerts/reservations             all reservation entries (GET)
/// /concerts/{id}                     get, delete
/// /concerts/{id}/reserve             reserve a seat (POST)
/// /concerts/{id}/cancel              cancel a reservation (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/concerts", concert::router())
}
