use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use farmmarket_auth::Role;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::logging::logging_middleware;
use crate::modules::admin::router::init_admin_router;
use crate::modules::auth::router::{init_me_router, init_portal_router};
use crate::modules::buyer::router::init_buyer_router;
use crate::modules::farmer::router::init_farmer_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(init_me_router(&state))
        .nest(
            "/admin",
            init_portal_router(&state, Role::Admin).merge(init_admin_router(&state)),
        )
        .nest(
            "/farmer",
            init_portal_router(&state, Role::Farmer).merge(init_farmer_router(&state)),
        )
        .nest(
            "/buyer",
            init_portal_router(&state, Role::Buyer).merge(init_buyer_router(&state)),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
