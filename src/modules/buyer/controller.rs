use axum::{extract::State, response::Html};
use axum_extra::extract::CookieJar;
use farmmarket_auth::CSRF_FORM_FIELD;
use farmmarket_core::AppError;
use serde_json::json;
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, csrf_token) = state.csrf.issue_token(jar)?;

    let page = state.views.render(
        "buyer_home",
        &json!({
            "portal": identity.role,
            "csrf_field": CSRF_FORM_FIELD,
            "csrf_token": csrf_token,
            "user_id": identity.user_id,
        }),
    )?;
    Ok((jar, page))
}
