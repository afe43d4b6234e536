//! Seating Layout Core
//!
//! Pure, synchronous transformations that turn a compact zone specification
//! into a concrete seat inventory:
//!
//! - [`GridRef`] - rectangular placement anchor and overlap test
//! - [`generate`] - the seat layout generator ([`LayoutError`] on rejection)
//!
//! No I/O happens here; persistence is the repository layer's concern.

pub mod generator;
pub mod grid;

pub use generator::{LayoutError, MAX_SEATS_PER_ZONE, generate};
pub use grid::GridRef;
