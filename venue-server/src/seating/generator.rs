//! Seat Layout Generator
//!
//! Pure expansion of a zone's numbering scheme (and/or explicit seat
//! requests) into the full seat set. All-or-nothing: any error aborts the
//! whole generation, partial results are never returned.

use std::collections::{HashMap, HashSet};

use sqlx::types::Json;
use thiserror::Error;
use uuid::Uuid;

use crate::db::models::{NumberingMode, NumberingScheme, Seat, SeatSpec, SeatState};
use crate::seating::GridRef;

/// Upper bound on a single generated layout. A 1-indexed grid request that
/// exceeds this is a malformed specification, not a real venue.
pub const MAX_SEATS_PER_ZONE: i64 = 100_000;

/// Layout-construction failures, reported verbatim to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid numbering: {0}")]
    InvalidNumbering(String),

    #[error("explicit seats cannot be combined with ROWS_COLUMNS numbering")]
    ConflictingSpecification,

    #[error("seats '{first}' and '{second}' overlap on the grid")]
    OverlappingPlacement { first: String, second: String },

    #[error("duplicate seat label '{0}'")]
    DuplicateLabel(String),
}

/// Expand a numbering scheme and/or explicit seat specs into seat records.
///
/// Deterministic given identical inputs (up to seat identifiers), so a
/// retried or raced call is safe to re-apply wholesale under replace-all
/// semantics.
pub fn generate(
    zone_id: &str,
    event_id: &str,
    numbering: &NumberingScheme,
    explicit: &[SeatSpec],
) -> Result<Vec<Seat>, LayoutError> {
    match numbering.mode {
        NumberingMode::RowsColumns => {
            if !explicit.is_empty() {
                return Err(LayoutError::ConflictingSpecification);
            }
            generate_grid(zone_id, event_id, numbering)
        }
        NumberingMode::Manual => generate_manual(zone_id, event_id, explicit),
    }
}

/// ROWS_COLUMNS mode: one seat per cell of the rows x columns grid.
///
/// Label = row_prefix + row + seat_prefix + column, prefixes defaulting to
/// "". Row numbers are never reordered or skipped; alphabetic row naming is
/// a caller convention layered on row_prefix.
fn generate_grid(
    zone_id: &str,
    event_id: &str,
    numbering: &NumberingScheme,
) -> Result<Vec<Seat>, LayoutError> {
    let rows = numbering
        .rows
        .ok_or_else(|| LayoutError::InvalidNumbering("rows is required".into()))?;
    let columns = numbering
        .columns
        .ok_or_else(|| LayoutError::InvalidNumbering("columns is required".into()))?;
    if rows < 1 || columns < 1 {
        return Err(LayoutError::InvalidNumbering(format!(
            "rows and columns must be >= 1 (got {rows} x {columns})"
        )));
    }
    if rows.saturating_mul(columns) > MAX_SEATS_PER_ZONE {
        return Err(LayoutError::InvalidNumbering(format!(
            "{rows} x {columns} exceeds the {MAX_SEATS_PER_ZONE}-seat limit"
        )));
    }

    let row_prefix = numbering.row_prefix.as_deref().unwrap_or("");
    let seat_prefix = numbering.seat_prefix.as_deref().unwrap_or("");

    // Empty prefixes can make distinct cells synthesize the same label
    // (row 1 seat 11 vs row 11 seat 1 both read "111"), so uniqueness is
    // checked rather than assumed.
    let mut labels: HashSet<String> = HashSet::with_capacity((rows * columns) as usize);
    let mut seats = Vec::with_capacity((rows * columns) as usize);
    for r in 1..=rows {
        for c in 1..=columns {
            let label = format!("{row_prefix}{r}{seat_prefix}{c}");
            if !labels.insert(label.clone()) {
                return Err(LayoutError::DuplicateLabel(label));
            }
            seats.push(new_seat(zone_id, event_id, label, Some(r), Some(c), HashMap::new()));
        }
    }
    Ok(seats)
}

/// MANUAL mode: the explicit seat list is authoritative.
///
/// Positioned specs are checked against every previously accepted rectangle
/// (half-open intersection); unpositioned specs skip overlap checking but
/// are still subject to label uniqueness.
fn generate_manual(
    zone_id: &str,
    event_id: &str,
    explicit: &[SeatSpec],
) -> Result<Vec<Seat>, LayoutError> {
    let mut labels: HashSet<String> = HashSet::with_capacity(explicit.len());
    let mut placed: Vec<(GridRef, String)> = Vec::new();
    let mut seats = Vec::with_capacity(explicit.len());

    for (idx, spec) in explicit.iter().enumerate() {
        let label = resolve_label(spec, idx);
        if !labels.insert(label.clone()) {
            return Err(LayoutError::DuplicateLabel(label));
        }

        if let Some(grid) = &spec.grid_ref {
            if !grid.is_valid() {
                return Err(LayoutError::InvalidNumbering(format!(
                    "grid_ref of seat '{label}' must have start and span >= 1"
                )));
            }
            if let Some((_, first)) = placed.iter().find(|(other, _)| other.intersects(grid)) {
                return Err(LayoutError::OverlappingPlacement {
                    first: first.clone(),
                    second: label,
                });
            }
            placed.push((*grid, label.clone()));
        }

        seats.push(new_seat(
            zone_id,
            event_id,
            label,
            spec.grid_ref.map(|g| g.start_row),
            spec.grid_ref.map(|g| g.start_col),
            spec.meta.clone(),
        ));
    }
    Ok(seats)
}

/// Every seat ends up with a non-empty label: a provided label that is
/// empty after trimming counts as missing and is derived deterministically.
fn resolve_label(spec: &SeatSpec, idx: usize) -> String {
    match spec.label.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(label) => label.to_string(),
        None => match &spec.grid_ref {
            Some(grid) => format!("R{}C{}", grid.start_row, grid.start_col),
            None => format!("S{}", idx + 1),
        },
    }
}

fn new_seat(
    zone_id: &str,
    event_id: &str,
    label: String,
    row_index: Option<i64>,
    col_index: Option<i64>,
    meta: HashMap<String, String>,
) -> Seat {
    Seat {
        id: Uuid::new_v4().to_string(),
        zone_id: zone_id.to_string(),
        event_id: event_id.to_string(),
        label,
        state: SeatState::Available,
        row_index,
        col_index,
        meta: Json(meta),
    }
}
