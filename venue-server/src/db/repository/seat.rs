//! Seat Repository

use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult, scenario, zone};
use crate::db::models::{Seat, SeatUpdate};
use crate::utils::validation::MAX_LABEL_LEN;

const COLUMNS: &str = "id, zone_id, event_id, label, state, row_index, col_index, meta";

/// Persist a generated seat batch on the caller's transaction
pub(crate) async fn insert_batch(conn: &mut SqliteConnection, seats: &[Seat]) -> RepoResult<()> {
    for seat in seats {
        sqlx::query(
            "INSERT INTO seat (id, zone_id, event_id, label, state, row_index, col_index, meta) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&seat.id)
        .bind(&seat.zone_id)
        .bind(&seat.event_id)
        .bind(&seat.label)
        .bind(seat.state)
        .bind(seat.row_index)
        .bind(seat.col_index)
        .bind(&seat.meta)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Seats of a zone, positioned seats first in reading order.
///
/// Returns an empty list (not an error) when the zone does not belong to
/// the event.
pub async fn list_by_zone(
    pool: &SqlitePool,
    event_id: &str,
    zone_id: &str,
) -> RepoResult<Vec<Seat>> {
    let seats = sqlx::query_as::<_, Seat>(&format!(
        "SELECT {COLUMNS} FROM seat WHERE zone_id = ?1 AND event_id = ?2 \
         ORDER BY row_index IS NULL, row_index, col_index, label"
    ))
    .bind(zone_id)
    .bind(event_id)
    .fetch_all(pool)
    .await?;
    Ok(seats)
}

/// Layered lookup: the zone must belong to the event before any seat-level
/// check happens.
pub async fn get_by_id(
    pool: &SqlitePool,
    event_id: &str,
    zone_id: &str,
    seat_id: &str,
) -> RepoResult<Seat> {
    zone::find_in_event(pool, event_id, zone_id)
        .await?
        .ok_or_else(|| {
            RepoError::NotFound(format!("Zone {zone_id} not found in event {event_id}"))
        })?;

    let seat = sqlx::query_as::<_, Seat>(&format!(
        "SELECT {COLUMNS} FROM seat WHERE id = ?1 AND zone_id = ?2"
    ))
    .bind(seat_id)
    .bind(zone_id)
    .fetch_optional(pool)
    .await?;
    seat.ok_or_else(|| RepoError::NotFound(format!("Seat {seat_id} not found in zone {zone_id}")))
}

/// Partial update of label/state/meta. Grid position never changes here, so
/// overlap validation is not re-run; a changed label is re-checked for
/// uniqueness within the zone.
pub async fn update(
    pool: &SqlitePool,
    event_id: &str,
    zone_id: &str,
    seat_id: &str,
    data: SeatUpdate,
) -> RepoResult<Seat> {
    let existing = get_by_id(pool, event_id, zone_id, seat_id).await?;

    let label = match &data.label {
        Some(l) => {
            let label = l.trim();
            if label.is_empty() {
                return Err(RepoError::Validation("label must not be empty".into()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(RepoError::Validation(format!(
                    "label is too long ({} chars, max {MAX_LABEL_LEN})",
                    label.len()
                )));
            }
            if label != existing.label {
                let taken: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM seat WHERE zone_id = ?1 AND label = ?2 AND id <> ?3",
                )
                .bind(zone_id)
                .bind(label)
                .bind(seat_id)
                .fetch_one(pool)
                .await?;
                if taken > 0 {
                    return Err(RepoError::Duplicate(format!(
                        "Seat label '{label}' already exists in this zone"
                    )));
                }
            }
            Some(label.to_string())
        }
        None => None,
    };

    sqlx::query(
        "UPDATE seat SET label = COALESCE(?1, label), state = COALESCE(?2, state), \
         meta = COALESCE(?3, meta) WHERE id = ?4",
    )
    .bind(&label)
    .bind(data.state)
    .bind(data.meta.map(Json))
    .bind(seat_id)
    .execute(pool)
    .await?;

    get_by_id(pool, event_id, zone_id, seat_id).await
}

/// Remove one seat and recompute the owning scenario's capacity.
pub async fn delete(
    pool: &SqlitePool,
    event_id: &str,
    zone_id: &str,
    seat_id: &str,
) -> RepoResult<bool> {
    get_by_id(pool, event_id, zone_id, seat_id).await?;

    let event = sqlx::query_as::<_, crate::db::models::Event>(
        "SELECT id, scenario_id, nombre, created_at, updated_at FROM event WHERE id = ?",
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Event {event_id} not found")))?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM seat WHERE id = ?")
        .bind(seat_id)
        .execute(&mut *tx)
        .await?;
    scenario::recompute_capacity(&mut tx, &event.scenario_id).await?;
    tx.commit().await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        EventCreate, NumberingScheme, ScenarioCreate, SeatState, ZoneCreate,
    };
    use crate::db::repository::{event, zone};
    use crate::db::test_support::test_pool;
    use std::collections::HashMap;

    struct Fixture {
        scenario_id: String,
        event_id: String,
        zone_id: String,
        seats: Vec<Seat>,
    }

    async fn seed_zone(pool: &SqlitePool, rows: i64, columns: i64) -> Fixture {
        let s = scenario::create(
            pool,
            ScenarioCreate {
                nombre: "Foro Sol".into(),
                descripcion: None,
                ubicacion: None,
                ciudad: None,
                estado: None,
                pais: None,
            },
        )
        .await
        .unwrap();
        let e = event::create(
            pool,
            EventCreate {
                scenario_id: s.id.clone(),
                nombre: "Concierto".into(),
            },
        )
        .await
        .unwrap();
        let z = zone::create(
            pool,
            &e.id,
            ZoneCreate {
                name: "General".into(),
                numbering: NumberingScheme::rows_columns(rows, columns),
                seats: vec![],
            },
        )
        .await
        .unwrap();
        Fixture {
            scenario_id: s.id,
            event_id: e.id,
            zone_id: z.zone.id,
            seats: z.seats,
        }
    }

    #[tokio::test]
    async fn list_by_zone_orders_by_grid_position() {
        let pool = test_pool().await;
        let fx = seed_zone(&pool, 2, 2).await;

        let seats = list_by_zone(&pool, &fx.event_id, &fx.zone_id).await.unwrap();
        let labels: Vec<_> = seats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["11", "12", "21", "22"]);
    }

    #[tokio::test]
    async fn list_by_zone_with_foreign_zone_is_empty_not_an_error() {
        let pool = test_pool().await;
        let fx = seed_zone(&pool, 2, 2).await;

        let seats = list_by_zone(&pool, "other-event", &fx.zone_id).await.unwrap();
        assert!(seats.is_empty());
    }

    #[tokio::test]
    async fn get_by_id_checks_zone_membership_before_seat() {
        let pool = test_pool().await;
        let fx = seed_zone(&pool, 1, 1).await;
        let seat_id = &fx.seats[0].id;

        // Zone/event mismatch fails even though the seat exists
        let err = get_by_id(&pool, "other-event", &fx.zone_id, seat_id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        // Matching chain succeeds
        let seat = get_by_id(&pool, &fx.event_id, &fx.zone_id, seat_id).await.unwrap();
        assert_eq!(&seat.id, seat_id);

        // Unknown seat in a valid zone
        let err = get_by_id(&pool, &fx.event_id, &fx.zone_id, "nope").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_renames_with_uniqueness_check() {
        let pool = test_pool().await;
        let fx = seed_zone(&pool, 1, 2).await;

        // "12" is taken by the second seat
        let err = update(
            &pool,
            &fx.event_id,
            &fx.zone_id,
            &fx.seats[0].id,
            SeatUpdate {
                label: Some("12".into()),
                state: None,
                meta: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let seat = update(
            &pool,
            &fx.event_id,
            &fx.zone_id,
            &fx.seats[0].id,
            SeatUpdate {
                label: Some("A1".into()),
                state: Some(SeatState::Blocked),
                meta: Some(HashMap::from([("fila".to_string(), "1".to_string())])),
            },
        )
        .await
        .unwrap();
        assert_eq!(seat.label, "A1");
        assert_eq!(seat.state, SeatState::Blocked);
        assert_eq!(seat.meta.get("fila"), Some(&"1".to_string()));
        // Grid position untouched
        assert_eq!(seat.row_index, fx.seats[0].row_index);
        assert_eq!(seat.col_index, fx.seats[0].col_index);
    }

    #[tokio::test]
    async fn update_keeps_same_label_without_conflict() {
        let pool = test_pool().await;
        let fx = seed_zone(&pool, 1, 1).await;

        let seat = update(
            &pool,
            &fx.event_id,
            &fx.zone_id,
            &fx.seats[0].id,
            SeatUpdate {
                label: Some(fx.seats[0].label.clone()),
                state: Some(SeatState::Reserved),
                meta: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(seat.state, SeatState::Reserved);
    }

    #[tokio::test]
    async fn delete_removes_seat_and_recomputes_capacity() {
        let pool = test_pool().await;
        let fx = seed_zone(&pool, 2, 3).await;

        delete(&pool, &fx.event_id, &fx.zone_id, &fx.seats[0].id)
            .await
            .unwrap();

        let seats = list_by_zone(&pool, &fx.event_id, &fx.zone_id).await.unwrap();
        assert_eq!(seats.len(), 5);

        let s = scenario::find_by_id(&pool, &fx.scenario_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(s.capacidad_total, 5);

        let err = delete(&pool, &fx.event_id, &fx.zone_id, &fx.seats[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
