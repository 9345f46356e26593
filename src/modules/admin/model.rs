use farmmarket_auth::{CSRF_FORM_FIELD, Role, UserId};
use farmmarket_models::User;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct DashboardPage {
    pub portal: Role,
    pub csrf_field: &'static str,
    pub csrf_token: String,
    pub user_id: UserId,
    pub pending_farmers: i64,
}

#[derive(Serialize, Debug)]
pub struct UserRow {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UsersPage {
    pub portal: Role,
    pub csrf_field: &'static str,
    pub csrf_token: String,
    pub users: Vec<UserRow>,
}

impl UsersPage {
    pub fn new(csrf_token: String, users: Vec<User>) -> Self {
        Self {
            portal: Role::Admin,
            csrf_field: CSRF_FORM_FIELD,
            csrf_token,
            users: users.into_iter().map(UserRow::from).collect(),
        }
    }
}
