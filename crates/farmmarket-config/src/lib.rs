//! # Farmmarket Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`csrf`]: CSRF cookie lifetime and SameSite policy
//! - [`session`]: session cookie name, lifetime and backing store
//! - [`server`]: listen port
//!
//! # Example
//!
//! ```ignore
//! use farmmarket_config::{CorsConfig, CsrfConfig, ServerConfig, SessionConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let csrf_config = CsrfConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod csrf;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use csrf::{CsrfConfig, SameSitePolicy};
pub use server::ServerConfig;
pub use session::{SessionBackend, SessionConfig};


/// Upper bound for cookie and session lifetimes (400 days, the longest
/// `Max-Age` browsers honour).
pub const MAX_TTL_SECONDS: i64 = 400 * 24 * 60 * 60;

/// Returns `ttl` when it lies in `1..=MAX_TTL_SECONDS`, otherwise `default`.
pub fn bounded_ttl(ttl: i64, default: i64) -> i64 {
    if (1..=MAX_TTL_SECONDS).contains(&ttl) {
        ttl
    } else {
        default
    }
}

/// Parses a lifetime in seconds read from `key`, falling back to `default`
/// with a warning when the value is unparsable or out of range.
pub(crate) fn parse_ttl(key: &str, raw: Option<String>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<i64>() {
        Ok(ttl) if bounded_ttl(ttl, 0) == ttl => ttl,
        Ok(ttl) => {
            tracing::warn!(
                key,
                value = ttl,
                max = MAX_TTL_SECONDS,
                "Lifetime out of range, using default"
            );
            default
        }
        Err(_) => {
            tracing::warn!(key, value = %raw, "Lifetime is not a number, using default");
            default
        }
    }
}

/// Reads an environment variable and parses it, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
