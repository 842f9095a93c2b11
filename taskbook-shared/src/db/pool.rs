/// Database connection pool
///
/// PostgreSQL pool construction via sqlx, with a startup health check so a
/// misconfigured `DATABASE_URL` fails fast instead of on the first request.
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(PoolConfig {
///     url: std::env::var("DATABASE_URL").unwrap(),
///     ..Default::default()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub acquire_timeout_seconds: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            acquire_timeout_seconds: 30,
        }
    }
}

/// Creates a PostgreSQL connection pool and verifies connectivity
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database is unreachable, or
/// the health check fails.
pub async fn create_pool(config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        "creating database connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;

    info!("database connection pool ready");
    Ok(pool)
}

/// Runs a trivial query to verify the database responds
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("running database health check");

    let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
