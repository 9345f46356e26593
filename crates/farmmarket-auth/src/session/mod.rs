//! Session lookup capability.
//!
//! The middleware depends only on [`SessionStore`]; the concrete adapter is
//! chosen at startup. [`PgSessionStore`] is the production adapter and
//! [`MemorySessionStore`] backs tests and single-process development runs.

mod memory;
mod postgres;

pub use memory::MemorySessionStore;
pub use postgres::PgSessionStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::StoreError;
use crate::identity::{Identity, Role, UserId};

/// A persisted login session.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: UserId,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.role)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolves a session id to the identity it was created for.
    ///
    /// Returns `Ok(None)` both when the id is unknown and when the session
    /// has expired. Never extends the session.
    async fn lookup(&self, session_id: &str) -> Result<Option<Identity>, StoreError>;

    /// Starts a new session for `user_id` lasting `ttl`.
    async fn create(
        &self,
        user_id: UserId,
        role: Role,
        ttl: chrono::Duration,
    ) -> Result<SessionRecord, StoreError>;

    /// Ends a session. Revoking an unknown id is not an error.
    async fn revoke(&self, session_id: &str) -> Result<(), StoreError>;

    /// Ends every session belonging to `user_id` and returns how many there were.
    async fn revoke_user(&self, user_id: UserId) -> Result<u64, StoreError>;

    /// Deletes every expired session and returns how many were removed.
    async fn purge_expired(&self) -> Result<u64, StoreError>;
}
