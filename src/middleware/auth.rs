use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use farmmarket_auth::{AuthError, Identity, SessionStore};
use farmmarket_core::AppError;
use tracing::{debug, warn};

/// What the authentication middleware needs: the session store and the name
/// of the cookie carrying the session id.
#[derive(Clone)]
pub struct SessionAuth {
    pub store: Arc<dyn SessionStore>,
    pub cookie_name: Arc<str>,
}

impl SessionAuth {
    pub fn new(store: Arc<dyn SessionStore>, cookie_name: &str) -> Self {
        Self {
            store,
            cookie_name: Arc::from(cookie_name),
        }
    }

    /// Resolves the session cookie in `jar` to an identity.
    pub async fn resolve(&self, jar: &CookieJar) -> Result<Identity, AuthError> {
        let session_id = jar
            .get(&self.cookie_name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingSessionCookie)?;

        self.store
            .lookup(session_id)
            .await?
            .ok_or(AuthError::SessionNotFound)
    }
}

/// Rejects requests without a live session with 401; otherwise attaches the
/// session's [`Identity`] to the request and calls the next service.
///
/// Read-only on the store: sessions are never created or extended here.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/me", get(me))
///     .route_layer(middleware::from_fn_with_state(state.session_auth.clone(), authenticate));
/// ```
pub async fn authenticate(
    State(auth): State<SessionAuth>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = auth.resolve(&jar).await.map_err(|err| {
        // Store failures are logged as server errors by AppError.
        if !matches!(err, AuthError::Store(_)) {
            warn!(path = %req.uri().path(), reason = %err, "Rejected unauthenticated request");
        }
        err
    })?;

    debug!(
        user_id = %identity.user_id,
        role = %identity.role,
        "Request authenticated"
    );

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Extractor for the identity attached by [`authenticate`].
///
/// Fails with a server error when the route is missing the authentication
/// layer, since that is a wiring mistake rather than a client error.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn me(CurrentUser(identity): CurrentUser) -> Json<Identity> {
///     Json(identity)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(CurrentUser)
            .ok_or_else(|| AuthError::IdentityNotPresent.into())
    }
}
