use anyhow::anyhow;
use farmmarket_auth::{Role, UserId};
use farmmarket_core::AppError;
use farmmarket_models::User;
use sqlx::PgPool;
use tracing::instrument;

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db))]
    pub async fn count_pending_farmers(db: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'farmer' AND is_active = false")
            .fetch_one(db)
            .await
            .map_err(AppError::database)
    }

    /// Farmer and buyer accounts. Admins are managed from the CLI.
    #[instrument(skip(db))]
    pub async fn list_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, role, is_active, created_at
             FROM users
             WHERE role <> 'admin'
             ORDER BY role, created_at DESC",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    /// Flips `is_active` on a farmer or buyer account. Admin accounts are
    /// treated as not found.
    #[instrument(skip(db))]
    pub async fn toggle_status(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users
             SET is_active = NOT is_active, updated_at = NOW()
             WHERE id = $1 AND role <> 'admin'
             RETURNING id, first_name, last_name, email, role, is_active, created_at",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn list_pending_farmers(db: &PgPool) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, role, is_active, created_at
             FROM users
             WHERE role = 'farmer' AND is_active = false
             ORDER BY created_at",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    /// Activates a farmer awaiting approval. Anything else is not found.
    #[instrument(skip(db))]
    pub async fn approve_farmer(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users
             SET is_active = true, updated_at = NOW()
             WHERE id = $1 AND role = 'farmer' AND is_active = false
             RETURNING id, first_name, last_name, email, role, is_active, created_at",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Pending farmer not found")))
    }

    /// Deletes a farmer that was never approved.
    #[instrument(skip(db))]
    pub async fn reject_farmer(db: &PgPool, user_id: UserId) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM users WHERE id = $1 AND role = 'farmer' AND is_active = false",
        )
        .bind(user_id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Pending farmer not found")));
        }
        Ok(())
    }

    /// Deletes an account of the given role. Admin accounts cannot be
    /// deleted here.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, user_id: UserId, role: Role) -> Result<(), AppError> {
        if role == Role::Admin {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
            .bind(user_id)
            .bind(role)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }
        Ok(())
    }
}
