//! # Taskbook API Server
//!
//! Multi-user to-do backend: registration, token-based login, and
//! per-owner task management over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskbook \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p taskbook-api
//! ```

use std::sync::Arc;

use taskbook_api::{app, config::Config, seed};
use taskbook_shared::db::{migrations, pool};
use taskbook_shared::store::postgres::{PgTaskStore, PgUserStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskbook_api=info,taskbook_shared=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskbook API server v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = pool::create_pool(pool::PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&pool).await?;

    let users = Arc::new(PgUserStore::new(pool.clone()));
    let tasks = Arc::new(PgTaskStore::new(pool));

    if let Some(seed_config) = &config.seed {
        seed::ensure_admin(users.as_ref(), &seed_config.admin_password).await?;
    }

    let bind_address = config.bind_address();
    let state = app::AppState::new(users, tasks, config);
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("listening on http://{}", bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}
