use axum::{Router, middleware, routing::get};

use super::controller::dashboard;
use crate::middleware::auth::authenticate;
use crate::middleware::role::RequireRoleLayer;
use crate::state::AppState;

pub fn init_farmer_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(RequireRoleLayer::farmer_or_admin())
        .route_layer(middleware::from_fn_with_state(
            state.session_auth.clone(),
            authenticate,
        ))
}
