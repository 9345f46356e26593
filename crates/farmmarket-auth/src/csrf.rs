//! Double-submit cookie CSRF protection.
//!
//! A page that renders a state-changing form calls [`CsrfGuard::issue_token`],
//! which sets the `csrf_token` cookie and hands back the same value for a
//! hidden `csrf_token` form field. On submission [`CsrfGuard::validate_token`]
//! compares the two. Nothing is stored server-side.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use farmmarket_config::{CsrfConfig, SameSitePolicy};
use subtle::ConstantTimeEq;
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;
use crate::token::generate_token;

pub const CSRF_COOKIE_NAME: &str = "csrf_token";
pub const CSRF_FORM_FIELD: &str = "csrf_token";

/// A submitted form that carries the `csrf_token` field.
pub trait CsrfProtectedForm {
    fn csrf_token(&self) -> Option<&str>;
}

#[derive(Clone, Debug)]
pub struct CsrfGuard {
    ttl: Duration,
    same_site: SameSite,
}

impl CsrfGuard {
    pub fn new(config: &CsrfConfig) -> Self {
        Self {
            ttl: Duration::seconds(config.cookie_ttl()),
            same_site: match config.same_site {
                SameSitePolicy::Strict => SameSite::Strict,
                SameSitePolicy::Lax => SameSite::Lax,
                SameSitePolicy::None => SameSite::None,
            },
        }
    }

    /// Generates a fresh token, adds it to `jar` as the `csrf_token` cookie
    /// and returns the updated jar together with the token for the form.
    pub fn issue_token(&self, jar: CookieJar) -> Result<(CookieJar, String), AuthError> {
        let token = generate_token()?;

        let cookie = Cookie::build((CSRF_COOKIE_NAME, token.clone()))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(self.same_site)
            .max_age(self.ttl)
            .expires(OffsetDateTime::now_utc().checked_add(self.ttl));

        Ok((jar.add(cookie), token))
    }

    /// Checks a submitted form token against the `csrf_token` cookie.
    pub fn validate_token(&self, form_token: Option<&str>, jar: &CookieJar) -> Result<(), AuthError> {
        let form_token = form_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::CsrfMissingField)?;

        let cookie = jar
            .get(CSRF_COOKIE_NAME)
            .ok_or(AuthError::CsrfMissingCookie)?;

        if !tokens_match(form_token, cookie.value()) {
            return Err(AuthError::CsrfMismatch);
        }

        Ok(())
    }
}

impl Default for CsrfGuard {
    fn default() -> Self {
        Self::new(&CsrfConfig::default())
    }
}

/// Constant-time equality. Differing lengths compare unequal.
fn tokens_match(submitted: &str, expected: &str) -> bool {
    submitted.as_bytes().ct_eq(expected.as_bytes()).into()
}
