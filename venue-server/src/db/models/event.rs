//! Event Model

use serde::{Deserialize, Serialize};

/// Event entity - links a scenario to its seating zones
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: String,
    pub scenario_id: String,
    pub nombre: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreate {
    pub scenario_id: String,
    pub nombre: String,
}
