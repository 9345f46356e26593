use anyhow::anyhow;
use axum::{
    Extension, Json,
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::CookieJar;
use farmmarket_auth::{AuthError, Identity};
use farmmarket_core::AppError;
use farmmarket_models::{LoginForm, LogoutForm, RegisterForm};
use tracing::{info, instrument};

use super::model::{AuthPage, Portal, landing_path};
use super::service::AuthService;
use crate::middleware::auth::CurrentUser;
use crate::middleware::csrf::CsrfForm;
use crate::state::AppState;

#[instrument(skip_all, fields(portal = %portal.role()))]
pub async fn login_page(
    State(state): State<AppState>,
    Extension(portal): Extension<Portal>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, csrf_token) = state.csrf.issue_token(jar)?;
    let page = state.views.render("login", &AuthPage::new(portal, csrf_token))?;
    Ok((jar, page))
}

/// Verifies the credentials, starts a session and redirects to the role's
/// landing page.
#[instrument(skip_all, fields(portal = %portal.role()))]
pub async fn login(
    State(state): State<AppState>,
    Extension(portal): Extension<Portal>,
    jar: CookieJar,
    CsrfForm(form): CsrfForm<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let user = AuthService::verify_credentials(&state.db, &form, portal.role()).await?;

    let ttl = chrono::Duration::try_seconds(state.session_config.session_ttl())
        .ok_or_else(|| AppError::internal(anyhow!("Session lifetime out of range")))?;
    let session = state
        .sessions()
        .create(user.id, user.role, ttl)
        .await
        .map_err(AuthError::from)?;

    info!(user_id = %user.id, role = %user.role, "User logged in");

    let jar = jar.add(AuthService::session_cookie(&state.session_config, session.id));
    Ok((jar, Redirect::to(landing_path(user.role))))
}

#[instrument(skip_all, fields(portal = %portal.role()))]
pub async fn register_page(
    State(state): State<AppState>,
    Extension(portal): Extension<Portal>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, csrf_token) = state.csrf.issue_token(jar)?;
    let page = state.views.render("register", &AuthPage::new(portal, csrf_token))?;
    Ok((jar, page))
}

#[instrument(skip_all, fields(portal = %portal.role()))]
pub async fn register(
    State(state): State<AppState>,
    Extension(portal): Extension<Portal>,
    CsrfForm(form): CsrfForm<RegisterForm>,
) -> Result<Redirect, AppError> {
    let user = AuthService::register(&state.db, &form, portal.role()).await?;
    info!(user_id = %user.id, role = %user.role, active = user.is_active, "User registered");

    Ok(Redirect::to(&portal.login_path()))
}

/// Revokes the current session and clears its cookie.
#[instrument(skip_all, fields(user_id = %identity.user_id))]
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    jar: CookieJar,
    CsrfForm(_form): CsrfForm<LogoutForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get(&state.session_config.cookie_name) {
        state
            .sessions()
            .revoke(cookie.value())
            .await
            .map_err(AuthError::from)?;
    }

    info!("User logged out");

    let jar = jar.remove(AuthService::session_cookie_removal(&state.session_config));
    Ok((jar, Redirect::to(&Portal(identity.role).login_path())))
}

/// The identity behind the current session.
pub async fn me(CurrentUser(identity): CurrentUser) -> Json<Identity> {
    Json(identity)
}
