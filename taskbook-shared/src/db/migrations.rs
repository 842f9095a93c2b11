/// Schema migration runner
///
/// Migrations live in this crate's `migrations/` directory and are embedded
/// into the binary with `sqlx::migrate!`, so a deployed server carries its
/// own schema and applies pending migrations at startup.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute; sqlx rolls the failing
/// migration back where the statements allow it.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("applying database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("migration failed: {}", e);
            Err(e)
        }
    }
}
