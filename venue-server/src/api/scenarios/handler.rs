//! Scenario API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::models::{Page, Scenario, ScenarioCreate, ScenarioQuery, ScenarioUpdate};
use crate::db::repository::scenario;
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};

fn validate_optional_fields(
    descripcion: &Option<String>,
    ubicacion: &Option<String>,
    ciudad: &Option<String>,
    estado: &Option<String>,
    pais: &Option<String>,
) -> Result<(), AppError> {
    validate_optional_text(descripcion, "descripcion", MAX_TEXT_LEN)?;
    validate_optional_text(ubicacion, "ubicacion", MAX_TEXT_LEN)?;
    validate_optional_text(ciudad, "ciudad", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(estado, "estado", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(pais, "pais", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// GET /api/scenarios - filtered, paginated search
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<ScenarioQuery>,
) -> AppResult<Json<Page<Scenario>>> {
    let page = scenario::search(&state.pool, &query).await?;
    Ok(Json(page))
}

/// GET /api/scenarios/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Scenario>> {
    let scenario = scenario::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Scenario {id} not found")))?;
    Ok(Json(scenario))
}

/// POST /api/scenarios
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ScenarioCreate>,
) -> AppResult<Json<Scenario>> {
    validate_optional_fields(
        &payload.descripcion,
        &payload.ubicacion,
        &payload.ciudad,
        &payload.estado,
        &payload.pais,
    )?;
    let scenario = scenario::create(&state.pool, payload).await?;
    tracing::info!(id = %scenario.id, nombre = %scenario.nombre, "Scenario created");
    Ok(Json(scenario))
}

/// PUT /api/scenarios/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ScenarioUpdate>,
) -> AppResult<Json<Scenario>> {
    validate_optional_fields(
        &payload.descripcion,
        &payload.ubicacion,
        &payload.ciudad,
        &payload.estado,
        &payload.pais,
    )?;
    let scenario = scenario::update(&state.pool, &id, payload).await?;
    Ok(Json(scenario))
}

/// DELETE /api/scenarios/:id - hard delete, cascades to events/zones/seats
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = scenario::delete(&state.pool, &id).await?;
    tracing::info!(id = %id, "Scenario deleted");
    Ok(Json(result))
}
