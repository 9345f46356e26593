//! # Farmmarket
//!
//! A server-rendered marketplace connecting admins, farmers and buyers.
//! Built with Axum, PostgreSQL and Handlebars templates.
//!
//! ## Request pipeline
//!
//! Every protected route is wrapped, outermost first, in:
//!
//! ```text
//! CORS  ->  authenticate (session cookie -> Identity)  ->  RequireRoleLayer  ->  handler
//! ```
//!
//! - [`middleware::auth::authenticate`] resolves the session cookie through the
//!   configured [`farmmarket_auth::SessionStore`] and rejects with 401, or
//!   attaches an [`farmmarket_auth::Identity`] to the request.
//! - [`middleware::role::RequireRoleLayer`] rejects with 403 when the identity's
//!   role is not permitted for the route, and with 500 when no identity was
//!   attached (a wiring mistake).
//! - State-changing forms are extracted with [`middleware::csrf::CsrfForm`],
//!   which enforces the double-submit `csrf_token` cookie/field pair.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # authentication, role gating, CSRF form extractor
//! ├── modules/          # feature modules
//! │   ├── auth/        # login, registration, logout per portal
//! │   ├── admin/       # admin dashboard and user management
//! │   ├── farmer/      # farmer dashboard
//! │   └── buyer/       # buyer home
//! ├── logging.rs        # tracing setup and request logging middleware
//! ├── router.rs         # route table
//! ├── state.rs          # shared application state
//! ├── validator.rs      # form validation helpers
//! └── views.rs          # Handlebars template registry
//! ```
//!
//! ## Roles
//!
//! | Role | Created by | Landing page |
//! |------|------------|--------------|
//! | Admin | CLI only (`farmmarket-cli create-admin`) | `/admin/dashboard` |
//! | Farmer | `/farmer/register`, inactive until approved | `/farmer/dashboard` |
//! | Buyer | `/buyer/register` | `/buyer/home` |

pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;
pub mod views;

// Re-export workspace crates for convenience
pub use farmmarket_auth;
pub use farmmarket_config;
pub use farmmarket_core;
pub use farmmarket_db;
pub use farmmarket_models;
