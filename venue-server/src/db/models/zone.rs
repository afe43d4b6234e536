//! Zone Model

use serde::{Deserialize, Serialize};

use super::seat::{Seat, SeatSpec};

/// How seats in a zone are auto-labeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum NumberingMode {
    /// Full grid: rows x columns seats, labels synthesized from prefixes
    #[serde(rename = "ROWS_COLUMNS")]
    #[sqlx(rename = "ROWS_COLUMNS")]
    RowsColumns,
    /// Seats supplied explicitly by the caller
    #[serde(rename = "MANUAL")]
    #[sqlx(rename = "MANUAL")]
    Manual,
}

/// Zone-level numbering policy
///
/// In `ROWS_COLUMNS` mode `rows` and `columns` are required (>= 1).
/// In `MANUAL` mode they are advisory bounds and may be null.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NumberingScheme {
    pub mode: NumberingMode,
    pub rows: Option<i64>,
    pub columns: Option<i64>,
    pub row_prefix: Option<String>,
    pub seat_prefix: Option<String>,
}

impl NumberingScheme {
    /// Grid scheme with no prefixes
    pub fn rows_columns(rows: i64, columns: i64) -> Self {
        Self {
            mode: NumberingMode::RowsColumns,
            rows: Some(rows),
            columns: Some(columns),
            row_prefix: None,
            seat_prefix: None,
        }
    }

    /// Manual scheme, unbounded
    pub fn manual() -> Self {
        Self {
            mode: NumberingMode::Manual,
            rows: None,
            columns: None,
            row_prefix: None,
            seat_prefix: None,
        }
    }
}

/// Zone entity - a named subdivision of an event's venue
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Zone {
    pub id: String,
    pub event_id: String,
    pub name: String,
    #[sqlx(flatten)]
    pub numbering: NumberingScheme,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create zone payload: name + numbering scheme, plus explicit seats in MANUAL mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
    pub numbering: NumberingScheme,
    #[serde(default)]
    pub seats: Vec<SeatSpec>,
}

/// Rename zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub name: Option<String>,
}

/// Regenerate layout payload (replace-all)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneLayoutUpdate {
    pub numbering: NumberingScheme,
    #[serde(default)]
    pub seats: Vec<SeatSpec>,
}

/// Zone plus its computed seat count (list views)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ZoneSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub zone: Zone,
    pub seat_count: i64,
}

/// Zone plus the full seat set it owns (create/regenerate responses)
#[derive(Debug, Clone, Serialize)]
pub struct ZoneWithSeats {
    #[serde(flatten)]
    pub zone: Zone,
    pub seat_count: i64,
    pub seats: Vec<Seat>,
}
