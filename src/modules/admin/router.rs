use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{
    approve_farmer, dashboard, delete_buyer, delete_farmer, list_users, pending_farmers,
    reject_farmer, toggle_status,
};
use crate::middleware::auth::authenticate;
use crate::middleware::role::RequireRoleLayer;
use crate::state::AppState;

pub fn init_admin_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/pending-farmers", get(pending_farmers))
        .route("/dashboard/approve-farmer", post(approve_farmer))
        .route("/dashboard/reject-farmer", post(reject_farmer))
        .route("/users", get(list_users))
        .route("/users/toggle-status", post(toggle_status))
        .route("/users/delete-farmer", post(delete_farmer))
        .route("/users/delete-buyer", post(delete_buyer))
        .route_layer(RequireRoleLayer::admin_only())
        .route_layer(middleware::from_fn_with_state(
            state.session_auth.clone(),
            authenticate,
        ))
}
