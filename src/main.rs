use anyhow::Context;
use dotenvy::dotenv;
use farmmarket::farmmarket_config::ServerConfig;
use farmmarket::farmmarket_db::{init_db_pool, run_migrations};
use farmmarket::logging::init_tracing;
use farmmarket::router::init_router;
use farmmarket::state::init_app_state;
use farmmarket::views::Views;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing().context("Failed to create log directory")?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let views = Views::new().context("Failed to compile templates")?;
    let state = init_app_state(db, views);
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_address()))?;

    info!(port = server_config.port, "Server running on http://localhost:{}", server_config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
