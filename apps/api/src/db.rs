use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

/// Creates the PostgreSQL pool and brings the `cvs` schema up to date.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    pool.execute(include_str!("../migrations/0001_cvs.sql"))
        .await
        .context("Failed to apply CV schema")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
