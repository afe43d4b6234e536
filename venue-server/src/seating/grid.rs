//! Grid placement primitives

use serde::{Deserialize, Serialize};

/// Rectangular placement anchor inside a zone's grid.
///
/// Represents the half-open rectangle
/// `[start_row, start_row + row_span) x [start_col, start_col + col_span)`.
/// All four fields are 1-based and must be >= 1. Immutable once a seat is
/// attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRef {
    pub start_row: i64,
    pub start_col: i64,
    #[serde(default = "default_span")]
    pub row_span: i64,
    #[serde(default = "default_span")]
    pub col_span: i64,
}

fn default_span() -> i64 {
    1
}

impl GridRef {
    /// Single-cell reference at (row, col)
    pub fn unit(row: i64, col: i64) -> Self {
        Self {
            start_row: row,
            start_col: col,
            row_span: 1,
            col_span: 1,
        }
    }

    pub fn new(start_row: i64, start_col: i64, row_span: i64, col_span: i64) -> Self {
        Self {
            start_row,
            start_col,
            row_span,
            col_span,
        }
    }

    /// Starts and spans must all be >= 1
    pub fn is_valid(&self) -> bool {
        self.start_row >= 1 && self.start_col >= 1 && self.row_span >= 1 && self.col_span >= 1
    }

    /// First row past the rectangle (exclusive)
    pub fn end_row(&self) -> i64 {
        self.start_row + self.row_span
    }

    /// First column past the rectangle (exclusive)
    pub fn end_col(&self) -> i64 {
        self.start_col + self.col_span
    }

    /// Half-open rectangle intersection test. Rectangles that merely touch
    /// edges do not intersect.
    pub fn intersects(&self, other: &GridRef) -> bool {
        self.start_row < other.end_row()
            && other.start_row < self.end_row()
            && self.start_col < other.end_col()
            && other.start_col < self.end_col()
    }
}
