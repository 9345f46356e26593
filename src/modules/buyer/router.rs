use axum::{Router, middleware, routing::get};

use super::controller::home;
use crate::middleware::auth::authenticate;
use crate::middleware::role::RequireRoleLayer;
use crate::state::AppState;

pub fn init_buyer_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route_layer(RequireRoleLayer::buyer_only())
        .route_layer(middleware::from_fn_with_state(
            state.session_auth.clone(),
            authenticate,
        ))
}
