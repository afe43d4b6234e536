//! Seat API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Seat, SeatUpdate};
use crate::db::repository::seat;
use crate::utils::AppResult;

/// GET /api/events/:event_id/zones/:zone_id/seats
///
/// Empty list (not 404) when the zone does not belong to the event.
pub async fn list(
    State(state): State<ServerState>,
    Path((event_id, zone_id)): Path<(String, String)>,
) -> AppResult<Json<Vec<Seat>>> {
    let seats = seat::list_by_zone(&state.pool, &event_id, &zone_id).await?;
    Ok(Json(seats))
}

/// GET /api/events/:event_id/zones/:zone_id/seats/:seat_id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((event_id, zone_id, seat_id)): Path<(String, String, String)>,
) -> AppResult<Json<Seat>> {
    let seat = seat::get_by_id(&state.pool, &event_id, &zone_id, &seat_id).await?;
    Ok(Json(seat))
}

/// PATCH /api/events/:event_id/zones/:zone_id/seats/:seat_id
pub async fn update(
    State(state): State<ServerState>,
    Path((event_id, zone_id, seat_id)): Path<(String, String, String)>,
    Json(payload): Json<SeatUpdate>,
) -> AppResult<Json<Seat>> {
    let seat = seat::update(&state.pool, &event_id, &zone_id, &seat_id, payload).await?;
    Ok(Json(seat))
}

/// DELETE /api/events/:event_id/zones/:zone_id/seats/:seat_id
pub async fn delete(
    State(state): State<ServerState>,
    Path((event_id, zone_id, seat_id)): Path<(String, String, String)>,
) -> AppResult<Json<bool>> {
    let result = seat::delete(&state.pool, &event_id, &zone_id, &seat_id).await?;
    Ok(Json(result))
}
