use std::sync::Arc;

use admin_gateway::auth::JwtSessionProvider;
use admin_gateway::config;
use admin_gateway::database::{DatabaseManager, PgRepository};
use admin_gateway::{app, AppState};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("admin_gateway=info,tower_http=info")),
        )
        .init();

    let config = config::config().clone();
    tracing::info!("Starting Admin Gateway in {:?} mode", config.environment);

    let pool = DatabaseManager::connect_lazy(&config.database).context("failed to configure database pool")?;
    let sessions = JwtSessionProvider::new(&config.auth.jwt_secret).context("failed to configure session provider")?;

    let bind_addr = config.bind_addr();
    let state = AppState::new(Arc::new(PgRepository::new(pool)), Arc::new(sessions), config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Admin Gateway listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
