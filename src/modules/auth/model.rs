use farmmarket_auth::{CSRF_FORM_FIELD, Role};
use serde::Serialize;

/// The role a portal router serves, attached as a request extension so the
/// shared login/register handlers know which portal they were reached through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portal(pub Role);

impl Portal {
    pub fn role(self) -> Role {
        self.0
    }

    /// Admin accounts are only created from the operator CLI.
    pub fn allows_registration(self) -> bool {
        self.0 != Role::Admin
    }

    pub fn login_path(self) -> String {
        format!("/{}/login", self.0)
    }
}

/// Where a freshly logged-in user of `role` is sent.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::Farmer => "/farmer/dashboard",
        Role::Buyer => "/buyer/home",
    }
}

#[derive(Serialize, Debug)]
pub struct AuthPage {
    pub portal: Role,
    pub csrf_field: &'static str,
    pub csrf_token: String,
    pub can_register: bool,
}

impl AuthPage {
    pub fn new(portal: Portal, csrf_token: String) -> Self {
        Self {
            portal: portal.role(),
            csrf_field: CSRF_FORM_FIELD,
            csrf_token,
            can_register: portal.allows_registration(),
        }
    }
}
