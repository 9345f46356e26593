//! Error taxonomy for the authentication core.
//!
//! Client-correctable failures (missing or mismatched CSRF tokens, missing or
//! unknown sessions, role mismatches) map to 4xx responses. Entropy, storage
//! and middleware-composition failures are server faults.

use axum::http::StatusCode;
use farmmarket_core::AppError;
use thiserror::Error;

use crate::identity::Role;

/// The operating system's random source could not produce bytes.
#[derive(Debug, Error)]
#[error("random source unavailable: {0}")]
pub struct RandomSourceError(#[from] pub rand::Error);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    RandomSource(#[from] RandomSourceError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    RandomSource(#[from] RandomSourceError),

    #[error("CSRF token not provided")]
    CsrfMissingField,

    #[error("CSRF token cookie not found")]
    CsrfMissingCookie,

    #[error("Invalid CSRF token")]
    CsrfMismatch,

    #[error("Authentication required")]
    MissingSessionCookie,

    /// Unknown and expired sessions are deliberately indistinguishable.
    #[error("Session is invalid or has expired")]
    SessionNotFound,

    /// A role check ran without a preceding authentication layer.
    #[error("Request identity not present; authentication layer is missing")]
    IdentityNotPresent,

    #[error(
        "Access denied. Required roles: {}, but user has role: {role}",
        join_roles(.allowed)
    )]
    Forbidden { role: Role, allowed: Vec<Role> },

    #[error("Session store failure: {0}")]
    Store(#[from] StoreError),
}

/// Renders roles the way they appear in URLs and the database.
fn join_roles(roles: &[Role]) -> String {
    if roles.is_empty() {
        return "none".to_string();
    }
    roles
        .iter()
        .map(Role::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingSessionCookie | AuthError::SessionNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::CsrfMissingField
            | AuthError::CsrfMissingCookie
            | AuthError::CsrfMismatch
            | AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthError::RandomSource(_) | AuthError::IdentityNotPresent | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::new(err.status(), err)
    }
}
