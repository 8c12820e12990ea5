pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserProfile;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

/// Represents the payload for a user login request.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Email e senha são obrigatórios"),
        length(min = 1, message = "Email e senha são obrigatórios")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Email e senha são obrigatórios"),
        length(min = 1, message = "Email e senha são obrigatórios")
    )]
    pub password: Option<String>,
}

/// Represents the payload for a new user registration request.
/// All three fields are required and must be non-empty.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "Todos os campos são obrigatórios"),
        length(min = 1, message = "Todos os campos são obrigatórios")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Todos os campos são obrigatórios"),
        length(min = 1, message = "Todos os campos são obrigatórios")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Todos os campos são obrigatórios"),
        length(min = 1, message = "Todos os campos são obrigatórios")
    )]
    pub password: Option<String>,
}

impl RegisterRequest {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }
}

/// Body returned by a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed bearer token.
    pub token: String,
}

/// Body returned by `/api/auth/validate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        assert!(LoginRequest::new("test@example.com", "password123")
            .validate()
            .is_ok());
        assert!(LoginRequest::new("", "password123").validate().is_err());
        assert!(LoginRequest::new("test@example.com", "").validate().is_err());
        assert!(LoginRequest::default().validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        assert!(RegisterRequest::new("Test", "test@example.com", "pw")
            .validate()
            .is_ok());
        assert!(RegisterRequest::new("", "test@example.com", "pw")
            .validate()
            .is_err());
        assert!(RegisterRequest::new("Test", "", "pw").validate().is_err());
        assert!(RegisterRequest::new("Test", "test@example.com", "")
            .validate()
            .is_err());

        let missing_name: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@b.c","password":"pw"}"#).unwrap();
        assert!(missing_name.validate().is_err());
    }
}
