//! Startup steps shared by both service binaries.

use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};

/// Failures while preparing the database before serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("migration task failed: {message}")]
    MigrationTask { message: String },
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Install the JSON tracing subscriber, filtered by `RUST_LOG`.
///
/// A subscriber that is already installed is left in place.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

/// Apply pending migrations, then open the connection pool.
///
/// # Errors
/// Returns [`StartupError`] when migrations fail or the pool cannot be built.
pub async fn prepare_database(config: PoolConfig) -> Result<DbPool, StartupError> {
    let url = config.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| StartupError::MigrationTask {
            message: err.to_string(),
        })??;
    info!(applied, "database schema up to date");
    Ok(DbPool::new(config).await?)
}
