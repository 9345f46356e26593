use axum::{
    Extension, Router, middleware,
    routing::{get, post},
};
use farmmarket_auth::Role;

use super::controller::{login, login_page, logout, me, register, register_page};
use super::model::Portal;
use crate::middleware::auth::authenticate;
use crate::state::AppState;

/// Login, logout and registration routes for one role's portal, to be nested
/// under `/{role}`.
pub fn init_portal_router(state: &AppState, role: Role) -> Router<AppState> {
    let portal = Portal(role);

    let mut public = Router::new().route("/login", get(login_page).post(login));
    if portal.allows_registration() {
        public = public.route("/register", get(register_page).post(register));
    }

    let authenticated = Router::new()
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(
            state.session_auth.clone(),
            authenticate,
        ));

    public.merge(authenticated).layer(Extension(portal))
}

/// `/me`, open to any authenticated role.
pub fn init_me_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.session_auth.clone(),
            authenticate,
        ))
}
