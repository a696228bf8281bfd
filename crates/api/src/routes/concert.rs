//! Route definitions for the `/concerts` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{concert, reservation};
use crate::state::AppState;

/// Routes mounted at `/concerts`.
///
/// ```text
/// GET    /                 -> list (?user_name=)
/// POST   /                 -> create
/// GET    /reservations     -> reservation report
/// GET    /{id}             -> get_by_id
/// DELETE /{id}             -> delete
/// POST   /{id}/reserve     -> reserve
/// PATCH  /{id}/cancel      -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(concert::list).post(concert::create))
        .route("/reservations", get(reservation::report))
        .route("/{id}", get(concert::get_by_id).delete(concert::delete))
        .route("/{id}/reserve", post(reservation::reserve))
        .route("/{id}/cancel", patch(reservation::cancel))
}
