//! Handlers for seat reservations on a concert.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use encore_core::concert::ReservationRequest;

use crate::error::AppResult;
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/v1/concerts/{id}/reserve
pub async fn reserve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let user = state.concerts.reserve_seat(&id, &input.user_name).await?;
    Ok(Json(MessageResponse::for_user("reserve success", user)))
}

/// PATCH /api/v1/concerts/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let user = state
        .concerts
        .cancel_reservation(&id, &input.user_name)
        .await?;
    Ok(Json(MessageResponse::for_user("cancel success", user)))
}

/// GET /api/v1/concerts/reservations
///
/// Every reservation entry across all concerts, cancellations included.
pub async fn report(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = state.concerts.reservation_report().await?;
    Ok(Json(report))
}
