//! # Farmmarket Auth
//!
//! The request-authentication core of Farmmarket.
//!
//! - [`token`]: 32-byte tokens from the operating system's CSPRNG
//! - [`csrf`]: double-submit CSRF cookie issuance and validation
//! - [`identity`]: user ids, roles and the per-request [`Identity`]
//! - [`session`]: the [`SessionStore`] capability with Postgres and in-memory adapters
//! - [`error`]: the [`AuthError`] taxonomy and its HTTP status mapping
//!
//! The HTTP middleware that composes these pieces lives in the `farmmarket`
//! application crate; everything here is framework-light and stateless
//! apart from the session stores.

pub mod csrf;
pub mod error;
pub mod identity;
pub mod session;
pub mod token;

// Re-export commonly used types at crate root
pub use csrf::{CSRF_COOKIE_NAME, CSRF_FORM_FIELD, CsrfGuard, CsrfProtectedForm};
pub use error::{AuthError, RandomSourceError, StoreError};
pub use identity::{Identity, Role, UserId};
pub use session::{MemorySessionStore, PgSessionStore, SessionRecord, SessionStore};
pub use token::{TOKEN_BYTES, generate_token};
