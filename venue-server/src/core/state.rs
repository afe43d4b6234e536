//! Server state

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state - shared handles for all request handlers
///
/// Cloning is cheap; the pool is internally reference-counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Initialize the server state:
    /// 1. work_dir layout (database/, logs/)
    /// 2. database pool + migrations
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("venue.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db.pool))
    }
}
