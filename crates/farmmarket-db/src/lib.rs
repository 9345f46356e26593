//! # Farmmarket DB
//!
//! PostgreSQL connection pool and embedded schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use farmmarket_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool(&std::env::var("DATABASE_URL")?).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;

/// Opens a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and meant to be created once at
/// startup and shared through application state.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    info!(max_connections = MAX_CONNECTIONS, "Database pool initialized");
    Ok(pool)
}

/// Applies the migrations under the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
