//! Authentication forms.
//!
//! These types deliberately do not derive `Debug` so that passwords never
//! end up in logs or spans.

use farmmarket_auth::CsrfProtectedForm;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogoutForm {
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl CsrfProtectedForm for LoginForm {
    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

impl CsrfProtectedForm for RegisterForm {
    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

impl CsrfProtectedForm for LogoutForm {
    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(email: &str, password: &str) -> RegisterForm {
        RegisterForm {
            first_name: "Ada".to_string(),
            last_name: "Okafor".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            csrf_token: None,
        }
    }

    #[test]
    fn test_register_form_validation() {
        assert!(register_form("ada@farm.test", "longenough").validate().is_ok());
        assert!(register_form("not-an-email", "longenough").validate().is_err());
        assert!(register_form("ada@farm.test", "short").validate().is_err());
    }

    #[test]
    fn test_login_form_requires_password() {
        let form = LoginForm {
            email: "ada@farm.test".to_string(),
            password: String::new(),
            csrf_token: Some("token".to_string()),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_missing_csrf_field_deserializes_as_none() {
        let form: LogoutForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.csrf_token(), None);
    }
}
