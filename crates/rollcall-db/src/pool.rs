//! PostgreSQL connection pool initialization.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use rollcall_config::DatabaseConfig;

use crate::store::StoreError;

/// Connects to the database described by `config` and runs pending migrations.
///
/// Fails with [`StoreError::Unavailable`] when `DATABASE_URL` is unset, and
/// with [`StoreError::Database`] when no connection can be established within
/// the configured connect timeout.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| StoreError::Unavailable("DATABASE_URL is not set".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .connect(url)
        .await?;

    run_migrations(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Connected to PostgreSQL"
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Database(e.into()))
}
