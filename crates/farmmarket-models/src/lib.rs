//! # Farmmarket Models
//!
//! Database entities and submitted-form DTOs.
//!
//! - [`auth`]: login, registration and logout forms
//! - [`users`]: the user entity and admin user-management forms
//!
//! Every form that changes state carries a `csrf_token` field and implements
//! [`farmmarket_auth::CsrfProtectedForm`].

pub mod auth;
pub mod users;

pub use auth::{LoginForm, LogoutForm, RegisterForm};
pub use users::{User, UserActionForm};
