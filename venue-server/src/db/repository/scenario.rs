//! Scenario Repository

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::db::models::{Page, Scenario, ScenarioCreate, ScenarioQuery, ScenarioUpdate};
use crate::utils::now_millis;
use crate::utils::validation::MAX_NAME_LEN;

const COLUMNS: &str = "id, nombre, descripcion, ubicacion, ciudad, estado, pais, \
                       capacidad_total, activo, created_at, updated_at";

fn validate_nombre(nombre: &str) -> RepoResult<&str> {
    let trimmed = nombre.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation("nombre must not be empty".into()));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(RepoError::Validation(format!(
            "nombre is too long ({} chars, max {MAX_NAME_LEN})",
            trimmed.len()
        )));
    }
    Ok(trimmed)
}

pub async fn create(pool: &SqlitePool, data: ScenarioCreate) -> RepoResult<Scenario> {
    let nombre = validate_nombre(&data.nombre)?;
    let id = Uuid::new_v4().to_string();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO scenario (id, nombre, descripcion, ubicacion, ciudad, estado, pais, \
         capacidad_total, activo, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 1, ?8, ?8)",
    )
    .bind(&id)
    .bind(nombre)
    .bind(&data.descripcion)
    .bind(&data.ubicacion)
    .bind(&data.ciudad)
    .bind(&data.estado)
    .bind(&data.pais)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create scenario".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Scenario>> {
    let scenario =
        sqlx::query_as::<_, Scenario>(&format!("SELECT {COLUMNS} FROM scenario WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(scenario)
}

pub async fn update(pool: &SqlitePool, id: &str, data: ScenarioUpdate) -> RepoResult<Scenario> {
    let nombre = match &data.nombre {
        Some(n) => Some(validate_nombre(n)?.to_string()),
        None => None,
    };

    let rows = sqlx::query(
        "UPDATE scenario SET \
         nombre = COALESCE(?1, nombre), \
         descripcion = COALESCE(?2, descripcion), \
         ubicacion = COALESCE(?3, ubicacion), \
         ciudad = COALESCE(?4, ciudad), \
         estado = COALESCE(?5, estado), \
         pais = COALESCE(?6, pais), \
         activo = COALESCE(?7, activo), \
         updated_at = ?8 \
         WHERE id = ?9",
    )
    .bind(&nombre)
    .bind(&data.descripcion)
    .bind(&data.ubicacion)
    .bind(&data.ciudad)
    .bind(&data.estado)
    .bind(&data.pais)
    .bind(data.activo)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Scenario {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Scenario {id} not found")))
}

/// Hard delete. Events, zones and seats go with it via cascade.
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM scenario WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Scenario {id} not found")));
    }
    Ok(true)
}

/// Filtered, paginated search.
///
/// `q`/`ciudad` are case-insensitive substring filters, `activo` is exact;
/// an absent filter means no constraint. Ordering is `created_at, id` so
/// repeated identical queries over unchanged data page identically.
pub async fn search(pool: &SqlitePool, query: &ScenarioQuery) -> RepoResult<Page<Scenario>> {
    if query.page < 1 {
        return Err(RepoError::Validation("page must be >= 1".into()));
    }
    if query.page_size < 1 {
        return Err(RepoError::Validation("page_size must be >= 1".into()));
    }

    const FILTER: &str = "(?1 IS NULL OR instr(lower(nombre), lower(?1)) > 0) \
         AND (?2 IS NULL OR instr(lower(ciudad), lower(?2)) > 0) \
         AND (?3 IS NULL OR activo = ?3)";

    let total: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM scenario WHERE {FILTER}"))
            .bind(query.q.as_deref())
            .bind(query.ciudad.as_deref())
            .bind(query.activo)
            .fetch_one(pool)
            .await?;

    let items = sqlx::query_as::<_, Scenario>(&format!(
        "SELECT {COLUMNS} FROM scenario WHERE {FILTER} \
         ORDER BY created_at, id LIMIT ?4 OFFSET ?5"
    ))
    .bind(query.q.as_deref())
    .bind(query.ciudad.as_deref())
    .bind(query.activo)
    .bind(query.page_size)
    .bind((query.page - 1) * query.page_size)
    .fetch_all(pool)
    .await?;

    Ok(Page {
        items,
        total,
        page: query.page,
        page_size: query.page_size,
    })
}

/// Re-derive `capacidad_total` from the seats currently attached to the
/// scenario's events' zones. Runs on the caller's connection so mutations
/// and their recompute commit atomically.
pub async fn recompute_capacity(
    conn: &mut SqliteConnection,
    scenario_id: &str,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE scenario SET capacidad_total = (\
             SELECT COUNT(*) FROM seat s \
             JOIN zone z ON s.zone_id = z.id \
             JOIN event e ON z.event_id = e.id \
             WHERE e.scenario_id = ?1\
         ), updated_at = ?2 WHERE id = ?1",
    )
    .bind(scenario_id)
    .bind(now_millis())
    .execute(conn)
    .await?;
    Ok(())
}
