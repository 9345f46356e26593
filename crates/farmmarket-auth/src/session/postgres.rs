use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use super::{SessionRecord, SessionStore};
use crate::error::StoreError;
use crate::identity::{Identity, Role, UserId};
use crate::token::generate_token;

/// Sessions persisted in the `sessions` table.
#[derive(Clone, Debug)]
pub struct PgSessionStore {
    db: PgPool,
}

impl PgSessionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    #[instrument(skip_all)]
    async fn lookup(&self, session_id: &str) -> Result<Option<Identity>, StoreError> {
        let identity = sqlx::query_as::<_, Identity>(
            "SELECT user_id, role FROM sessions WHERE id = $1 AND expires_at > NOW()",
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(identity)
    }

    #[instrument(skip(self, ttl))]
    async fn create(
        &self,
        user_id: UserId,
        role: Role,
        ttl: chrono::Duration,
    ) -> Result<SessionRecord, StoreError> {
        let record = sqlx::query_as::<_, SessionRecord>(
            "INSERT INTO sessions (id, user_id, role, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, role, expires_at",
        )
        .bind(generate_token()?)
        .bind(user_id)
        .bind(role)
        .bind(Utc::now() + ttl)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    #[instrument(skip_all)]
    async fn revoke(&self, session_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_user(&self, user_id: UserId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
