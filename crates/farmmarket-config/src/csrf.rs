//! CSRF cookie configuration.
//!
//! # Environment Variables
//!
//! - `CSRF_COOKIE_TTL_SECONDS`: lifetime of the `csrf_token` cookie (default: 86400)
//! - `CSRF_COOKIE_SAME_SITE`: `none`, `lax` or `strict` (default: `none`)

use std::fmt;
use std::str::FromStr;

/// SameSite attribute applied to a cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    Lax,
    /// Cookie is sent on cross-site requests. Browsers require `Secure` with it.
    None,
}

impl FromStr for SameSitePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSitePolicy::Strict),
            "lax" => Ok(SameSitePolicy::Lax),
            "none" => Ok(SameSitePolicy::None),
            other => Err(format!("unknown SameSite policy: {}", other)),
        }
    }
}

impl fmt::Display for SameSitePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SameSitePolicy::Strict => "strict",
            SameSitePolicy::Lax => "lax",
            SameSitePolicy::None => "none",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct CsrfConfig {
    /// Lifetime of the `csrf_token` cookie in seconds.
    pub cookie_ttl_seconds: i64,
    pub same_site: SameSitePolicy,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_ttl_seconds: 86400, // 24 hours
            same_site: SameSitePolicy::None,
        }
    }
}

impl CsrfConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let same_site = match std::env::var("CSRF_COOKIE_SAME_SITE") {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Invalid CSRF_COOKIE_SAME_SITE, using default");
                defaults.same_site
            }),
            Err(_) => defaults.same_site,
        };

        Self {
            cookie_ttl_seconds: crate::parse_ttl(
                "CSRF_COOKIE_TTL_SECONDS",
                std::env::var("CSRF_COOKIE_TTL_SECONDS").ok(),
                defaults.cookie_ttl_seconds,
            ),
            same_site,
        }
    }

    /// Cookie lifetime in seconds, with out-of-range values replaced by the
    /// 24 hour default.
    pub fn cookie_ttl(&self) -> i64 {
        crate::bounded_ttl(self.cookie_ttl_seconds, Self::default().cookie_ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site_parse() {
        assert_eq!("strict".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Strict));
        assert_eq!(" LAX ".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Lax));
        assert_eq!("None".parse::<SameSitePolicy>(), Ok(SameSitePolicy::None));
        assert!("sometimes".parse::<SameSitePolicy>().is_err());
    }

    #[test]
    fn test_defaults_allow_cross_site() {
        let config = CsrfConfig::default();
        assert_eq!(config.cookie_ttl_seconds, 86400);
        assert_eq!(config.same_site, SameSitePolicy::None);
    }

    #[test]
    fn test_cookie_ttl_falls_back_when_out_of_range() {
        let mut config = CsrfConfig {
            cookie_ttl_seconds: -5,
            same_site: SameSitePolicy::Lax,
        };
        assert_eq!(config.cookie_ttl(), 86400);

        config.cookie_ttl_seconds = 9_999_999_999_999;
        assert_eq!(config.cookie_ttl(), 86400);

        config.cookie_ttl_seconds = 600;
        assert_eq!(config.cookie_ttl(), 600);
    }
}
