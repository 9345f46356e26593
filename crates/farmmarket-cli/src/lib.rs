//! # Farmmarket CLI
//!
//! Operator tasks that have no HTTP surface: creating admin accounts (the
//! web portals only register farmers and buyers) and purging expired
//! sessions.
//!
//! ## Usage
//!
//! ```ignore
//! use farmmarket_cli::{NewAdmin, create_admin};
//!
//! let admin = NewAdmin::new("Amaka", "Eze", "amaka@market.test", "s3cret-pass")?;
//! let id = create_admin(&pool, &admin).await?;
//! ```

use farmmarket_auth::{PgSessionStore, Role, SessionStore, StoreError, UserId};
use farmmarket_core::password::hash_password;
use sqlx::PgPool;
use thiserror::Error;
use validator::ValidateEmail;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    #[error("A user with email {0} already exists")]
    EmailTaken(String),

    #[error("{0}")]
    Hash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A validated admin account waiting to be inserted.
#[derive(Clone)]
pub struct NewAdmin {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

impl NewAdmin {
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CliError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let email = email.trim().to_string();

        if first_name.is_empty() {
            return Err(CliError::Missing("First name"));
        }
        if last_name.is_empty() {
            return Err(CliError::Missing("Last name"));
        }
        if !email.validate_email() {
            return Err(CliError::InvalidEmail(email));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CliError::PasswordTooShort);
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Inserts an active admin account. Fails if the email is already taken.
pub async fn create_admin(db: &PgPool, admin: &NewAdmin) -> Result<UserId, CliError> {
    let hashed_password =
        hash_password(&admin.password).map_err(|e| CliError::Hash(e.error.to_string()))?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (first_name, last_name, email, password, role, is_active)
         VALUES ($1, $2, $3, $4, $5, true)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&admin.first_name)
    .bind(&admin.last_name)
    .bind(&admin.email)
    .bind(&hashed_password)
    .bind(Role::Admin)
    .fetch_optional(db)
    .await?;

    user_id.ok_or_else(|| CliError::EmailTaken(admin.email.clone()))
}

/// Deletes expired rows from the `sessions` table.
pub async fn purge_expired_sessions(db: &PgPool) -> Result<u64, CliError> {
    let store = PgSessionStore::new(db.clone());
    Ok(store.purge_expired().await?)
}
