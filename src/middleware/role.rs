//! Role-based authorization.
//!
//! [`RequireRoleLayer`] reads the [`Identity`] attached by
//! [`authenticate`](crate::middleware::auth::authenticate) and only lets
//! requests through whose role is in the route's permitted set. It never
//! authenticates on its own: without an attached identity the request fails
//! with a server error.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use farmmarket_auth::{AuthError, Identity, Role};
use farmmarket_core::AppError;
use tower::{Layer, Service};
use tracing::warn;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Checks an optional identity against a permitted role set.
pub fn authorize(identity: Option<&Identity>, allowed: &[Role]) -> Result<(), AuthError> {
    let identity = identity.ok_or(AuthError::IdentityNotPresent)?;

    if !identity.has_any_role(allowed) {
        return Err(AuthError::Forbidden {
            role: identity.role,
            allowed: allowed.to_vec(),
        });
    }

    Ok(())
}

/// Helper to check roles from inside a handler.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn handler(CurrentUser(identity): CurrentUser) -> Result<Html<String>, AppError> {
///     check_any_role(&identity, &[Role::Farmer, Role::Admin])?;
///     // Handler logic
/// }
/// ```
pub fn check_any_role(identity: &Identity, allowed: &[Role]) -> Result<(), AppError> {
    authorize(Some(identity), allowed).map_err(AppError::from)
}

/// Layer restricting a route to a set of roles.
///
/// # Example
///
/// ```rust,ignore
/// let farmer_routes = Router::new()
///     .route("/dashboard", get(dashboard))
///     .route_layer(RequireRoleLayer::new([Role::Farmer, Role::Admin]))
///     .route_layer(middleware::from_fn_with_state(auth, authenticate));
/// ```
#[derive(Clone, Debug)]
pub struct RequireRoleLayer {
    allowed: Arc<[Role]>,
}

impl RequireRoleLayer {
    /// An empty set rejects every identity.
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn admin_only() -> Self {
        Self::new([Role::Admin])
    }

    pub fn farmer_or_admin() -> Self {
        Self::new([Role::Farmer, Role::Admin])
    }

    pub fn buyer_only() -> Self {
        Self::new([Role::Buyer])
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }
}

impl<S> Layer<S> for RequireRoleLayer {
    type Service = RequireRole<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireRole {
            inner,
            allowed: self.allowed.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RequireRole<S> {
    inner: S,
    allowed: Arc<[Role]>,
}

impl<S> Service<Request> for RequireRole<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let decision = authorize(req.extensions().get::<Identity>(), &self.allowed);

        match decision {
            Ok(()) => Box::pin(self.inner.call(req)),
            Err(err) => {
                if let AuthError::Forbidden { role, .. } = &err {
                    warn!(
                        path = %req.uri().path(),
                        role = %role,
                        allowed = ?self.allowed,
                        "Rejected request for role"
                    );
                }
                let response = AppError::from(err).into_response();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
