//! Scenario Model

use serde::{Deserialize, Serialize};

/// Scenario entity (venue: estadio, teatro, arena...)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Scenario {
    pub id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub ubicacion: Option<String>,
    pub ciudad: Option<String>,
    pub estado: Option<String>,
    pub pais: Option<String>,
    /// Derived: sum of seat counts across all zones of the scenario's events.
    /// Only ever written by the capacity recompute step.
    pub capacidad_total: i64,
    pub activo: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create scenario payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCreate {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub ubicacion: Option<String>,
    pub ciudad: Option<String>,
    pub estado: Option<String>,
    pub pais: Option<String>,
}

/// Update scenario payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioUpdate {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub ubicacion: Option<String>,
    pub ciudad: Option<String>,
    pub estado: Option<String>,
    pub pais: Option<String>,
    pub activo: Option<bool>,
}

/// Search filters and 1-based pagination
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioQuery {
    /// Case-insensitive substring match on nombre
    pub q: Option<String>,
    /// Case-insensitive substring match on ciudad
    pub ciudad: Option<String>,
    /// Exact filter; absent means no constraint
    pub activo: Option<bool>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// One page of results plus the full matching count
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}
