use std::sync::Arc;

use axum::extract::FromRef;
use farmmarket_auth::{CsrfGuard, MemorySessionStore, PgSessionStore, SessionStore};
use farmmarket_config::{CorsConfig, CsrfConfig, SessionBackend, SessionConfig};
use sqlx::PgPool;

use crate::middleware::auth::SessionAuth;
use crate::views::Views;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: PgPool,
    pub session_auth: SessionAuth,
    pub session_config: SessionConfig,
    pub csrf: CsrfGuard,
    pub cors_config: CorsConfig,
    pub views: Views,
}

impl AppState {
    pub fn new(
        db: PgPool,
        sessions: Arc<dyn SessionStore>,
        session_config: SessionConfig,
        csrf_config: &CsrfConfig,
        cors_config: CorsConfig,
        views: Views,
    ) -> Self {
        Self {
            db,
            session_auth: SessionAuth::new(sessions, &session_config.cookie_name),
            session_config,
            csrf: CsrfGuard::new(csrf_config),
            cors_config,
            views,
        }
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.session_auth.store
    }
}

/// Builds the state from environment configuration around an open pool.
pub fn init_app_state(db: PgPool, views: Views) -> AppState {
    let session_config = SessionConfig::from_env();

    let sessions: Arc<dyn SessionStore> = match session_config.backend {
        SessionBackend::Postgres => Arc::new(PgSessionStore::new(db.clone())),
        SessionBackend::Memory => {
            tracing::warn!("Using in-memory session store; sessions are lost on restart");
            Arc::new(MemorySessionStore::new())
        }
    };

    AppState::new(
        db,
        sessions,
        session_config,
        &CsrfConfig::from_env(),
        CorsConfig::from_env(),
        views,
    )
}
