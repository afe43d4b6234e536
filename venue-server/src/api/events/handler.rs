//! Event API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::models::{Event, EventCreate};
use crate::db::repository::event;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub scenario_id: Option<String>,
}

/// GET /api/events?scenario_id=xxx
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let events = event::find_all(&state.pool, query.scenario_id.as_deref()).await?;
    Ok(Json(events))
}

/// GET /api/events/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Event>> {
    let event = event::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))?;
    Ok(Json(event))
}

/// POST /api/events
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<Json<Event>> {
    validate_required_text(&payload.nombre, "nombre", MAX_NAME_LEN)?;
    let event = event::create(&state.pool, payload).await?;
    tracing::info!(id = %event.id, scenario = %event.scenario_id, "Event created");
    Ok(Json(event))
}

/// DELETE /api/events/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = event::delete(&state.pool, &id).await?;
    Ok(Json(result))
}
