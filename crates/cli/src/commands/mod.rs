//! CLI subcommands.

pub mod migrate;
pub mod seed;

use bookstore_api::config::{self, ConfigError};
use bookstore_api::db;
use sqlx::PgPool;

/// Connect to the database named by the environment.
async fn connect() -> Result<PgPool, ConnectError> {
    let database_url = config::database_url_from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url, 2).await?)
}

/// Failure to reach the database.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
