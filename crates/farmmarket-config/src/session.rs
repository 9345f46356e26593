//! Session cookie and store configuration.
//!
//! # Environment Variables
//!
//! - `SESSION_COOKIE_NAME`: name of the session id cookie (default: `session_token`)
//! - `SESSION_TTL_SECONDS`: lifetime of a session created at login (default: 86400)
//! - `SESSION_STORE`: `postgres` or `memory` (default: `postgres`)

use std::str::FromStr;

/// Where sessions are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionBackend {
    Postgres,
    /// Process-local; sessions are lost on restart.
    Memory,
}

impl FromStr for SessionBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(SessionBackend::Postgres),
            "memory" => Ok(SessionBackend::Memory),
            other => Err(format!("unknown session store: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub backend: SessionBackend,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session_token".to_string(),
            ttl_seconds: 86400,
            backend: SessionBackend::Postgres,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = match std::env::var("SESSION_STORE") {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Invalid SESSION_STORE, using postgres");
                defaults.backend
            }),
            Err(_) => defaults.backend,
        };

        Self {
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.cookie_name),
            ttl_seconds: crate::parse_ttl(
                "SESSION_TTL_SECONDS",
                std::env::var("SESSION_TTL_SECONDS").ok(),
                defaults.ttl_seconds,
            ),
            backend,
        }
    }

    /// Session lifetime in seconds, with out-of-range values replaced by the
    /// 24 hour default.
    pub fn session_ttl(&self) -> i64 {
        crate::bounded_ttl(self.ttl_seconds, Self::default().ttl_seconds)
    }
}
