//! Event Repository

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult, scenario};
use crate::db::models::{Event, EventCreate};
use crate::utils::now_millis;
use crate::utils::validation::MAX_NAME_LEN;

const COLUMNS: &str = "id, scenario_id, nombre, created_at, updated_at";

pub async fn create(pool: &SqlitePool, data: EventCreate) -> RepoResult<Event> {
    let nombre = data.nombre.trim();
    if nombre.is_empty() {
        return Err(RepoError::Validation("nombre must not be empty".into()));
    }
    if nombre.len() > MAX_NAME_LEN {
        return Err(RepoError::Validation(format!(
            "nombre is too long ({} chars, max {MAX_NAME_LEN})",
            nombre.len()
        )));
    }

    scenario::find_by_id(pool, &data.scenario_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Scenario {} not found", data.scenario_id)))?;

    let id = Uuid::new_v4().to_string();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO event (id, scenario_id, nombre, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(&id)
    .bind(&data.scenario_id)
    .bind(nombre)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create event".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Event>> {
    let event = sqlx::query_as::<_, Event>(&format!("SELECT {COLUMNS} FROM event WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(event)
}

/// All events, optionally restricted to one scenario
pub async fn find_all(pool: &SqlitePool, scenario_id: Option<&str>) -> RepoResult<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(&format!(
        "SELECT {COLUMNS} FROM event \
         WHERE (?1 IS NULL OR scenario_id = ?1) ORDER BY created_at, id"
    ))
    .bind(scenario_id)
    .fetch_all(pool)
    .await?;
    Ok(events)
}

/// Hard delete; the event's zones and seats cascade away, so the owning
/// scenario's capacity is recomputed in the same transaction.
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let event = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Event {id} not found")))?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM event WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    scenario::recompute_capacity(&mut tx, &event.scenario_id).await?;
    tx.commit().await?;
    Ok(true)
}
