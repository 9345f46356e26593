use std::sync::LazyLock;

use anyhow::anyhow;
use axum_extra::extract::cookie::{Cookie, SameSite};
use farmmarket_auth::Role;
use farmmarket_config::SessionConfig;
use farmmarket_core::AppError;
use farmmarket_core::password::{hash_password, verify_password};
use farmmarket_models::{LoginForm, RegisterForm, User};
use sqlx::PgPool;
use tracing::{instrument, warn};

/// Hash checked against when the email is unknown, so that a login costs
/// one bcrypt verification whether or not the account exists.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("farmmarket-unknown-account").ok());

pub struct AuthService;

impl AuthService {
    /// Checks credentials for a login through the `portal` portal.
    ///
    /// Unknown emails, wrong passwords and accounts of another role all get
    /// the same 401 after a bcrypt verification. Registration still answers
    /// 409 for a taken email.
    #[instrument(skip_all, fields(portal = %portal))]
    pub async fn verify_credentials(
        db: &PgPool,
        form: &LoginForm,
        portal: Role,
    ) -> Result<User, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            #[sqlx(flatten)]
            user: User,
            password: String,
        }

        let invalid = || AppError::unauthorized(anyhow!("Invalid email or password"));

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, first_name, last_name, email, role, is_active, created_at, password
             FROM users WHERE email = $1",
        )
        .bind(&form.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let Some(row) = row else {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&form.password, hash);
            }
            return Err(invalid());
        };

        if !verify_password(&form.password, &row.password)? {
            return Err(invalid());
        }

        if row.user.role != portal {
            warn!(user_id = %row.user.id, role = %row.user.role, "Login attempted through the wrong portal");
            return Err(invalid());
        }

        if !row.user.is_active {
            return Err(AppError::forbidden(anyhow!(
                "Account is inactive or awaiting approval"
            )));
        }

        Ok(row.user)
    }

    /// Creates an account with the portal's role. Farmers start inactive
    /// until an admin approves them.
    #[instrument(skip_all, fields(role = %role))]
    pub async fn register(db: &PgPool, form: &RegisterForm, role: Role) -> Result<User, AppError> {
        let hashed_password = hash_password(&form.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, password, role, is_active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, first_name, last_name, email, role, is_active, created_at",
        )
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.email)
        .bind(&hashed_password)
        .bind(role)
        .bind(role != Role::Farmer)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!("Email already exists"));
            }
            AppError::database(e)
        })?;

        Ok(user)
    }

    pub fn session_cookie(config: &SessionConfig, session_id: String) -> Cookie<'static> {
        Cookie::build((config.cookie_name.clone(), session_id))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(config.session_ttl()))
            .build()
    }

    /// Cookie that, when removed from a jar, clears the session cookie.
    pub fn session_cookie_removal(config: &SessionConfig) -> Cookie<'static> {
        Cookie::build((config.cookie_name.clone(), "")).path("/").build()
    }
}
