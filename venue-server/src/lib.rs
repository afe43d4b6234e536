//! Venue Server - seating inventory backend for a ticketing platform
//!
//! # Architecture overview
//!
//! - **Seating core** (`seating`): pure layout generation - expanding a
//!   zone's numbering scheme into a non-overlapping, uniquely labeled seat
//!   inventory
//! - **Database** (`db`): embedded SQLite storage, models and repositories
//! - **HTTP API** (`api`): RESTful interface over scenarios, events, zones
//!   and seats
//!
//! # Module structure
//!
//! ```text
//! venue-server/src/
//! ├── core/          # configuration, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # database layer (models, repositories)
//! ├── seating/       # seat layout generation core
//! └── utils/         # errors, logging, validation helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod seating;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState, build_app, build_router};
pub use seating::{GridRef, LayoutError};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

pub fn print_banner() {
    println!(
        r#"
 _    __
| |  / /__  ____  __  _____
| | / / _ \/ __ \/ / / / _ \
| |/ /  __/ / / / /_/ /  __/
|___/\___/_/ /_/\__,_/\___/
    "#
    );
}
