//! Seat Model

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use crate::seating::GridRef;

/// Seat lifecycle state. The layout engine only ever creates `Available`
/// seats; the other transitions belong to the booking subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum SeatState {
    Available,
    Reserved,
    Sold,
    Blocked,
}

/// Seat entity - one physical seat inside a zone
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Seat {
    pub id: String,
    /// Non-owning back-references; resolved through repositories, never
    /// traversed as in-memory pointers
    pub zone_id: String,
    pub event_id: String,
    pub label: String,
    pub state: SeatState,
    pub row_index: Option<i64>,
    pub col_index: Option<i64>,
    /// Free-form metadata, fixed string-to-string mapping
    pub meta: Json<HashMap<String, String>>,
}

/// One explicitly placed seat in a MANUAL layout request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatSpec {
    pub grid_ref: Option<GridRef>,
    pub label: Option<String>,
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

/// Update seat payload. Grid position is immutable once attached; only
/// label, state and metadata can change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatUpdate {
    pub label: Option<String>,
    pub state: Option<SeatState>,
    pub meta: Option<HashMap<String, String>>,
}
