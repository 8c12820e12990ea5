use validator::Validate;

use crate::auth::{hash_password, verify_password, Claims, LoginRequest, RegisterRequest, TokenKeys};
use crate::error::{messages, AppError};
use crate::store::UserStore;

/// Registration, login and token validation.
///
/// Stateless apart from the injected store and signing keys; all session state lives
/// in the tokens it issues.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserStore,
    keys: TokenKeys,
}

impl AuthService {
    pub fn new(users: UserStore, keys: TokenKeys) -> Self {
        Self { users, keys }
    }

    /// Creates an account and returns the new user id.
    ///
    /// Fails with `ValidationError` on an empty field and `Conflict` when the email is taken.
    pub async fn register(&self, request: RegisterRequest) -> Result<i64, AppError> {
        request.validate()?;
        let name = request.name.unwrap_or_default();
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        if self.users.find_by_email(&email).await?.is_some() {
            log::info!("registration rejected: email already in use");
            return Err(AppError::Conflict(messages::EMAIL_IN_USE.into()));
        }

        let password_hash = hash_password(&password)?;
        // The unique index still guards against a concurrent registration.
        let id = self.users.insert(&name, &email, &password_hash).await?;
        log::info!("registered user {}", id);
        Ok(id)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// Unknown email and wrong password produce the same `Unauthorized` error.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        request.validate()?;
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        let user = match self.users.find_by_email(&email).await? {
            Some(user) if verify_password(&password, &user.password_hash) => user,
            _ => {
                log::warn!("failed login attempt");
                return Err(AppError::Unauthorized(messages::INVALID_CREDENTIALS.into()));
            }
        };

        let token = self.keys.generate_token(&user)?;
        log::info!("user {} logged in", user.id);
        Ok(token)
    }

    /// Verifies a bearer token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        self.keys.verify_token(token)
    }
}
