//! Repository Module
//!
//! CRUD and aggregation operations as free functions over `&SqlitePool`,
//! one file per aggregate. Multi-step mutations run inside a single
//! transaction; SQLite's single-writer model serializes concurrent layout
//! writes per zone, so replace-all regeneration never interleaves.

pub mod event;
pub mod scenario;
pub mod seat;
pub mod zone;

use thiserror::Error;

use crate::seating::LayoutError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
