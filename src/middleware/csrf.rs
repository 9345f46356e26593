use anyhow::anyhow;
use axum::{
    body::{Body, Bytes},
    extract::{FromRef, FromRequest, RawForm, Request, rejection::RawFormRejection},
    http::{HeaderValue, Method, header},
};
use axum_extra::extract::CookieJar;
use farmmarket_auth::{CsrfGuard, CsrfProtectedForm};
use farmmarket_core::AppError;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::warn;
use validator::Validate;

use crate::validator::{extract_form, validate};

/// Form extractor for state-changing requests.
///
/// Only the `csrf_token` field is read before the token is checked against
/// the `csrf_token` cookie. The full form is deserialized and validated
/// afterwards, so a forged submission gets a 403 and never a message about
/// its fields. `T` must itself carry the field, which the
/// [`CsrfProtectedForm`] bound enforces.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn login(
///     State(state): State<AppState>,
///     CsrfForm(form): CsrfForm<LoginForm>,
/// ) -> Result<impl IntoResponse, AppError> {
///     // form.csrf_token has already been checked
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsrfForm<T>(pub T);

#[derive(Deserialize, Default)]
struct CsrfField {
    #[serde(default)]
    csrf_token: Option<String>,
}

impl CsrfProtectedForm for CsrfField {
    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

impl<T, S> FromRequest<S> for CsrfForm<T>
where
    T: DeserializeOwned + Validate + CsrfProtectedForm,
    CsrfGuard: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let guard = CsrfGuard::from_ref(state);
        let jar = CookieJar::from_headers(req.headers());
        let path = req.uri().path().to_string();

        let RawForm(body) = RawForm::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                RawFormRejection::InvalidFormContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/x-www-form-urlencoded' header"
                )),
                _ => AppError::bad_request(anyhow!("Invalid form body")),
            })?;

        // An unreadable body counts as a missing token.
        let field: CsrfField = extract_form(form_request(body.clone()), state)
            .await
            .unwrap_or_default();

        guard
            .validate_token(field.csrf_token(), &jar)
            .map_err(|err| {
                warn!(path = %path, reason = %err, "CSRF validation failed");
                err
            })?;

        let value: T = extract_form(form_request(body), state).await?;
        validate(&value)?;

        Ok(CsrfForm(value))
    }
}

/// Rebuilds a urlencoded POST request around an already buffered body.
fn form_request(body: Bytes) -> Request {
    let mut req = Request::new(Body::from(body));
    *req.method_mut() = Method::POST;
    req.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    req
}
