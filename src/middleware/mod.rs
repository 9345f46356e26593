//! Middleware and extractors guarding Farmmarket routes.
//!
//! # Modules
//!
//! - [`auth`]: session-cookie authentication and the [`auth::CurrentUser`] extractor
//! - [`role`]: role gating layer composed after authentication
//! - [`csrf`]: CSRF-validating form extractor
//!
//! # Composition
//!
//! Layers added later wrap the ones added earlier, so authentication is added
//! last to run first:
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::{auth::authenticate, role::RequireRoleLayer};
//!
//! let admin_routes = Router::new()
//!     .route("/dashboard", get(dashboard))
//!     .route_layer(RequireRoleLayer::admin_only())
//!     .route_layer(middleware::from_fn_with_state(state.session_auth.clone(), authenticate));
//! ```

pub mod auth;
pub mod csrf;
pub mod role;
