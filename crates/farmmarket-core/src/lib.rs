//! # Farmmarket Core
//!
//! Foundational types shared by every Farmmarket crate:
//!
//! - [`errors`]: the HTTP-facing [`AppError`] and its JSON rendering
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use farmmarket_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery staple")?;
//! if !verify_password("guess", &hash)? {
//!     return Err(AppError::unauthorized(anyhow::anyhow!("Invalid email or password")));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
