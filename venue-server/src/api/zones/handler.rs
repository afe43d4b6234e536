//! Zone API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Zone, ZoneCreate, ZoneLayoutUpdate, ZoneSummary, ZoneUpdate, ZoneWithSeats};
use crate::db::repository::zone;
use crate::utils::{AppError, AppResult};

/// POST /api/events/:event_id/zones - create a zone and generate its layout
pub async fn create(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<Json<ZoneWithSeats>> {
    let zone = zone::create(&state.pool, &event_id, payload).await?;
    tracing::info!(
        id = %zone.zone.id,
        event = %event_id,
        seats = zone.seat_count,
        "Zone created"
    );
    Ok(Json(zone))
}

/// GET /api/events/:event_id/zones - zones with computed seat counts
pub async fn list_by_event(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<Vec<ZoneSummary>>> {
    let zones = zone::find_by_event(&state.pool, &event_id).await?;
    Ok(Json(zones))
}

/// GET /api/zones/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ZoneSummary>> {
    let zone = zone::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Zone {id} not found")))?;
    let seat_count = zone::seat_count(&state.pool, &id).await?;
    Ok(Json(ZoneSummary { zone, seat_count }))
}

/// PUT /api/zones/:id - rename
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ZoneUpdate>,
) -> AppResult<Json<Zone>> {
    let zone = zone::update(&state.pool, &id, payload).await?;
    Ok(Json(zone))
}

/// PUT /api/zones/:id/layout - replace-all layout regeneration
pub async fn regenerate_layout(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ZoneLayoutUpdate>,
) -> AppResult<Json<ZoneWithSeats>> {
    let zone = zone::regenerate_layout(&state.pool, &id, payload).await?;
    tracing::info!(id = %id, seats = zone.seat_count, "Zone layout regenerated");
    Ok(Json(zone))
}

/// DELETE /api/zones/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = zone::delete(&state.pool, &id).await?;
    tracing::info!(id = %id, "Zone deleted");
    Ok(Json(result))
}
