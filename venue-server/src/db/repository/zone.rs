//! Zone Repository
//!
//! Zone mutations own the layout lifecycle: expanding the numbering scheme
//! through the seating generator, attaching the seat set (replace-all), and
//! recomputing the owning scenario's capacity in the same transaction.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult, scenario, seat};
use crate::db::models::{
    Event, SeatState, Zone, ZoneCreate, ZoneLayoutUpdate, ZoneSummary, ZoneUpdate, ZoneWithSeats,
};
use crate::seating;
use crate::utils::now_millis;
use crate::utils::validation::MAX_NAME_LEN;

const COLUMNS: &str =
    "id, event_id, name, mode, rows, columns, row_prefix, seat_prefix, created_at, updated_at";

fn validate_name(name: &str) -> RepoResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation("name must not be empty".into()));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(RepoError::Validation(format!(
            "name is too long ({} chars, max {MAX_NAME_LEN})",
            trimmed.len()
        )));
    }
    Ok(trimmed)
}

async fn find_event(pool: &SqlitePool, event_id: &str) -> RepoResult<Event> {
    let event = sqlx::query_as::<_, Event>(
        "SELECT id, scenario_id, nombre, created_at, updated_at FROM event WHERE id = ?",
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?;
    event.ok_or_else(|| RepoError::NotFound(format!("Event {event_id} not found")))
}

/// Create a zone and generate its full seat set in one transaction.
pub async fn create(pool: &SqlitePool, event_id: &str, data: ZoneCreate) -> RepoResult<ZoneWithSeats> {
    let name = validate_name(&data.name)?.to_string();
    let event = find_event(pool, event_id).await?;

    if find_by_name_in_event(pool, event_id, &name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Zone '{name}' already exists in this event"
        )));
    }

    let zone_id = Uuid::new_v4().to_string();
    let seats = seating::generate(&zone_id, event_id, &data.numbering, &data.seats)?;
    let now = now_millis();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO zone (id, event_id, name, mode, rows, columns, row_prefix, seat_prefix, \
         created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(&zone_id)
    .bind(event_id)
    .bind(&name)
    .bind(data.numbering.mode)
    .bind(data.numbering.rows)
    .bind(data.numbering.columns)
    .bind(&data.numbering.row_prefix)
    .bind(&data.numbering.seat_prefix)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    seat::insert_batch(&mut tx, &seats).await?;
    scenario::recompute_capacity(&mut tx, &event.scenario_id).await?;
    tx.commit().await?;

    let zone = find_by_id(pool, &zone_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create zone".into()))?;
    Ok(ZoneWithSeats {
        zone,
        seat_count: seats.len() as i64,
        seats,
    })
}

/// Replace-all layout regeneration.
///
/// Permitted only while every existing seat is still AVAILABLE; once any
/// seat has been reserved or sold the layout is frozen.
pub async fn regenerate_layout(
    pool: &SqlitePool,
    zone_id: &str,
    data: ZoneLayoutUpdate,
) -> RepoResult<ZoneWithSeats> {
    let zone = find_by_id(pool, zone_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {zone_id} not found")))?;
    let event = find_event(pool, &zone.event_id).await?;

    let frozen: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM seat WHERE zone_id = ?1 AND state <> ?2")
            .bind(zone_id)
            .bind(SeatState::Available)
            .fetch_one(pool)
            .await?;
    if frozen > 0 {
        return Err(RepoError::Conflict(format!(
            "Zone '{}' has {frozen} seats no longer AVAILABLE; layout is frozen",
            zone.name
        )));
    }

    let seats = seating::generate(zone_id, &zone.event_id, &data.numbering, &data.seats)?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM seat WHERE zone_id = ?")
        .bind(zone_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "UPDATE zone SET mode = ?1, rows = ?2, columns = ?3, row_prefix = ?4, seat_prefix = ?5, \
         updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.numbering.mode)
    .bind(data.numbering.rows)
    .bind(data.numbering.columns)
    .bind(&data.numbering.row_prefix)
    .bind(&data.numbering.seat_prefix)
    .bind(now_millis())
    .bind(zone_id)
    .execute(&mut *tx)
    .await?;
    seat::insert_batch(&mut tx, &seats).await?;
    scenario::recompute_capacity(&mut tx, &event.scenario_id).await?;
    tx.commit().await?;

    let zone = find_by_id(pool, zone_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {zone_id} not found")))?;
    Ok(ZoneWithSeats {
        zone,
        seat_count: seats.len() as i64,
        seats,
    })
}

/// Rename a zone
pub async fn update(pool: &SqlitePool, zone_id: &str, data: ZoneUpdate) -> RepoResult<Zone> {
    let zone = find_by_id(pool, zone_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {zone_id} not found")))?;

    let name = match &data.name {
        Some(n) => {
            let name = validate_name(n)?.to_string();
            if let Some(found) = find_by_name_in_event(pool, &zone.event_id, &name).await?
                && found.id != zone.id
            {
                return Err(RepoError::Duplicate(format!(
                    "Zone '{name}' already exists in this event"
                )));
            }
            Some(name)
        }
        None => None,
    };

    sqlx::query("UPDATE zone SET name = COALESCE(?1, name), updated_at = ?2 WHERE id = ?3")
        .bind(&name)
        .bind(now_millis())
        .bind(zone_id)
        .execute(pool)
        .await?;

    find_by_id(pool, zone_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {zone_id} not found")))
}

/// Hard delete; seats cascade away, capacity is recomputed in the same
/// transaction.
pub async fn delete(pool: &SqlitePool, zone_id: &str) -> RepoResult<bool> {
    let zone = find_by_id(pool, zone_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {zone_id} not found")))?;
    let event = find_event(pool, &zone.event_id).await?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM zone WHERE id = ?")
        .bind(zone_id)
        .execute(&mut *tx)
        .await?;
    scenario::recompute_capacity(&mut tx, &event.scenario_id).await?;
    tx.commit().await?;
    Ok(true)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(&format!("SELECT {COLUMNS} FROM zone WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(zone)
}

/// Zone by id, but only if it belongs to the given event. The layered
/// existence checks in the seat queries go through this.
pub async fn find_in_event(
    pool: &SqlitePool,
    event_id: &str,
    zone_id: &str,
) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(&format!(
        "SELECT {COLUMNS} FROM zone WHERE id = ?1 AND event_id = ?2"
    ))
    .bind(zone_id)
    .bind(event_id)
    .fetch_optional(pool)
    .await?;
    Ok(zone)
}

pub async fn find_by_name_in_event(
    pool: &SqlitePool,
    event_id: &str,
    name: &str,
) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(&format!(
        "SELECT {COLUMNS} FROM zone WHERE event_id = ?1 AND name = ?2 LIMIT 1"
    ))
    .bind(event_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(zone)
}

/// All zones of an event with their computed seat counts
pub async fn find_by_event(pool: &SqlitePool, event_id: &str) -> RepoResult<Vec<ZoneSummary>> {
    let zones = sqlx::query_as::<_, ZoneSummary>(&format!(
        "SELECT {COLUMNS}, \
         (SELECT COUNT(*) FROM seat s WHERE s.zone_id = zone.id) AS seat_count \
         FROM zone WHERE event_id = ? ORDER BY name, id"
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await?;
    Ok(zones)
}

/// Seat count is always computed from the seat collection, never cached.
pub async fn seat_count(pool: &SqlitePool, zone_id: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seat WHERE zone_id = ?")
        .bind(zone_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
