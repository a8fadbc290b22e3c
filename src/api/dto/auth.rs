//! DTOs for registration and login.

use serde::Deserialize;
use validator::Validate;

use crate::application::use_cases::RegisterCommand;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[serde(default)]
    pub is_admin: bool,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            is_admin: req.is_admin,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let mut req = RegisterRequest {
            email: "reader@example.com".to_string(),
            password: "long enough".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Reader".to_string(),
            is_admin: false,
        };
        assert!(req.validate().is_ok());

        req.password = "short".to_string();
        assert!(req.validate().is_err());

        req.password = "long enough".to_string();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_is_admin_defaults_to_false() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.io","password":"12345678","first_name":"A","last_name":"B"}"#,
        )
        .unwrap();

        assert!(!req.is_admin);
    }
}
