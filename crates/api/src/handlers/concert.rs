//! Handlers for the `/concerts` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use encore_core::concert::CreateConcert;

use crate::error::AppResult;
use crate::query::ListConcertsParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/concerts
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateConcert>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let concert = state.concerts.create_concert(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: concert })))
}

/// GET /api/v1/concerts?user_name=
///
/// Listing view: no reservation lists, plus `is_user_reserved` and
/// `is_seat_full` flags.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListConcertsParams>,
) -> AppResult<impl IntoResponse> {
    let concerts = state
        .concerts
        .list_concerts(params.user_name.as_deref())
        .await?;
    Ok(Json(DataResponse { data: concerts }))
}

/// GET /api/v1/concerts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let concert = state.concerts.get_concert(&id).await?;
    Ok(Json(DataResponse { data: concert }))
}

/// DELETE /api/v1/concerts/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.concerts.delete_concert(&id).await?;
    Ok(Json(MessageResponse::new("delete success")))
}
