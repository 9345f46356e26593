use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{SessionRecord, SessionStore};
use crate::error::StoreError;
use crate::identity::{Identity, Role, UserId};
use crate::token::generate_token;

/// Process-local session store. Expired entries are dropped whenever a new
/// session is created, so the map stays bounded by the live sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a prepared record, replacing any session with the same id.
    pub async fn insert(&self, record: SessionRecord) {
        self.sessions.write().await.insert(record.id.clone(), record);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn lookup(&self, session_id: &str) -> Result<Option<Identity>, StoreError> {
        let sessions = self.sessions.read().await;
        let now = Utc::now();

        Ok(sessions
            .get(session_id)
            .filter(|record| !record.is_expired_at(now))
            .map(SessionRecord::identity))
    }

    async fn create(
        &self,
        user_id: UserId,
        role: Role,
        ttl: chrono::Duration,
    ) -> Result<SessionRecord, StoreError> {
        let now = Utc::now();
        let record = SessionRecord {
            id: generate_token()?,
            user_id,
            role,
            expires_at: now + ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, existing| !existing.is_expired_at(now));
        sessions.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn revoke(&self, session_id: &str) -> Result<(), StoreError> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn revoke_user(&self, user_id: UserId) -> Result<u64, StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| record.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
