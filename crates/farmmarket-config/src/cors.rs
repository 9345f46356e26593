//! Origins allowed to call the portals from another site.
//!
//! Session and CSRF cookies travel with cross-origin requests, so the
//! router enables credentials and every origin must be listed explicitly.

use std::env;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads the comma-separated `ALLOWED_ORIGINS` list.
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        Self {
            allowed_origins: parse_origins(&raw),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(DEFAULT_ORIGINS),
        }
    }
}

/// Splits an origin list, dropping blanks and trailing slashes. A `*`
/// entry is ignored since browsers refuse it on credentialed requests.
fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();

    for origin in raw.split(',').map(str::trim) {
        if origin.is_empty() {
            continue;
        }
        if origin == "*" {
            tracing::warn!("Wildcard origin ignored: credentialed requests need explicit origins");
            continue;
        }

        let origin = origin.trim_end_matches('/').to_string();
        if !origins.contains(&origin) {
            origins.push(origin);
        }
    }

    origins
}
