use axum::{
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::CookieJar;
use farmmarket_auth::{AuthError, CSRF_FORM_FIELD, Role, UserId};
use farmmarket_core::AppError;
use farmmarket_models::UserActionForm;
use tracing::{info, instrument};

use super::model::{DashboardPage, UsersPage};
use super::service::AdminService;
use crate::middleware::auth::CurrentUser;
use crate::middleware::csrf::CsrfForm;
use crate::state::AppState;

const PENDING_FARMERS_PATH: &str = "/admin/dashboard/pending-farmers";

#[instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let pending_farmers = AdminService::count_pending_farmers(&state.db).await?;
    let (jar, csrf_token) = state.csrf.issue_token(jar)?;

    let page = state.views.render(
        "admin_dashboard",
        &DashboardPage {
            portal: Role::Admin,
            csrf_field: CSRF_FORM_FIELD,
            csrf_token,
            user_id: identity.user_id,
            pending_farmers,
        },
    )?;
    Ok((jar, page))
}

#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let users = AdminService::list_users(&state.db).await?;
    let (jar, csrf_token) = state.csrf.issue_token(jar)?;

    let page = state
        .views
        .render("admin_users", &UsersPage::new(csrf_token, users))?;
    Ok((jar, page))
}

/// Activates or deactivates an account. Deactivation also ends the
/// account's live sessions.
#[instrument(skip_all, fields(admin_id = %admin.user_id, target = %form.user_id))]
pub async fn toggle_status(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    CsrfForm(form): CsrfForm<UserActionForm>,
) -> Result<Redirect, AppError> {
    let user = AdminService::toggle_status(&state.db, form.user_id).await?;

    if !user.is_active {
        revoke_sessions(&state, user.id).await?;
    }

    info!(active = user.is_active, "User status toggled");
    Ok(Redirect::to("/admin/users"))
}

#[instrument(skip_all)]
pub async fn pending_farmers(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let farmers = AdminService::list_pending_farmers(&state.db).await?;
    let (jar, csrf_token) = state.csrf.issue_token(jar)?;

    let page = state
        .views
        .render("admin_pending_farmers", &UsersPage::new(csrf_token, farmers))?;
    Ok((jar, page))
}

#[instrument(skip_all, fields(admin_id = %admin.user_id, target = %form.user_id))]
pub async fn approve_farmer(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    CsrfForm(form): CsrfForm<UserActionForm>,
) -> Result<Redirect, AppError> {
    AdminService::approve_farmer(&state.db, form.user_id).await?;

    info!("Farmer approved");
    Ok(Redirect::to(PENDING_FARMERS_PATH))
}

#[instrument(skip_all, fields(admin_id = %admin.user_id, target = %form.user_id))]
pub async fn reject_farmer(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    CsrfForm(form): CsrfForm<UserActionForm>,
) -> Result<Redirect, AppError> {
    AdminService::reject_farmer(&state.db, form.user_id).await?;
    revoke_sessions(&state, form.user_id).await?;

    info!("Farmer rejected");
    Ok(Redirect::to(PENDING_FARMERS_PATH))
}

pub async fn delete_farmer(
    state: State<AppState>,
    admin: CurrentUser,
    form: CsrfForm<UserActionForm>,
) -> Result<Redirect, AppError> {
    delete_user(state, admin, form, Role::Farmer).await
}

pub async fn delete_buyer(
    state: State<AppState>,
    admin: CurrentUser,
    form: CsrfForm<UserActionForm>,
) -> Result<Redirect, AppError> {
    delete_user(state, admin, form, Role::Buyer).await
}

#[instrument(skip_all, fields(admin_id = %admin.user_id, target = %form.user_id, role = %role))]
async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    CsrfForm(form): CsrfForm<UserActionForm>,
    role: Role,
) -> Result<Redirect, AppError> {
    AdminService::delete_user(&state.db, form.user_id, role).await?;
    revoke_sessions(&state, form.user_id).await?;

    info!("User deleted");
    Ok(Redirect::to("/admin/users"))
}

async fn revoke_sessions(state: &AppState, user_id: UserId) -> Result<(), AppError> {
    let revoked = state
        .sessions()
        .revoke_user(user_id)
        .await
        .map_err(AuthError::from)?;
    info!(revoked, "Revoked user sessions");
    Ok(())
}
