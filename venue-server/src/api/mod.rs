//! API Route Modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`scenarios`] - scenario (venue) management and search
//! - [`events`] - event management
//! - [`zones`] - zone management and layout generation
//! - [`seats`] - seat listing and editing

pub mod events;
pub mod health;
pub mod scenarios;
pub mod seats;
pub mod zones;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
