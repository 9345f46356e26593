//! User entity and admin user-management forms.

use farmmarket_auth::{CsrfProtectedForm, Role, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A marketplace account. The password hash is never selected into this type.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    /// Farmers stay inactive until an admin approves them.
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Admin form naming the account an action applies to (toggle, approve,
/// reject, delete).
#[derive(Debug, Deserialize, Validate)]
pub struct UserActionForm {
    pub user_id: UserId,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl CsrfProtectedForm for UserActionForm {
    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}
