//! Data Models
//!
//! Entity structs and request payloads, one file per aggregate.

pub mod event;
pub mod scenario;
pub mod seat;
pub mod zone;

pub use event::{Event, EventCreate};
pub use scenario::{Page, Scenario, ScenarioCreate, ScenarioQuery, ScenarioUpdate};
pub use seat::{Seat, SeatSpec, SeatState, SeatUpdate};
pub use zone::{
    NumberingMode, NumberingScheme, Zone, ZoneCreate, ZoneLayoutUpdate, ZoneSummary, ZoneUpdate,
    ZoneWithSeats,
};
