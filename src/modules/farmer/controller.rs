use axum::{extract::State, response::Html};
use axum_extra::extract::CookieJar;
use farmmarket_auth::CSRF_FORM_FIELD;
use farmmarket_core::AppError;
use serde_json::json;
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// Farmer landing page. Admins may view it too, in which case the logout
/// form points at the admin portal.
#[instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, csrf_token) = state.csrf.issue_token(jar)?;

    let page = state.views.render(
        "farmer_dashboard",
        &json!({
            "portal": identity.role,
            "csrf_field": CSRF_FORM_FIELD,
            "csrf_token": csrf_token,
            "user_id": identity.user_id,
            "role": identity.role,
        }),
    )?;
    Ok((jar, page))
}
