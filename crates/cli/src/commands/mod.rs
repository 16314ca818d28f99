//! CLI command implementations.

pub mod daily;
pub mod migrate;
pub mod seed;

use thiserror::Error;

use karam_admin::config::{ConfigError, PanelConfig};
use karam_admin::db::{self, RepositoryError};
use karam_core::DateError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Backend error: {0}")]
    Backend(#[from] RepositoryError),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] DateError),
}

/// Load the panel configuration and open a pool to its database.
async fn connect() -> Result<(PanelConfig, sqlx::PgPool), CommandError> {
    let config = PanelConfig::from_env()?;
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    Ok((config, pool))
}
