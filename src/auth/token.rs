use crate::error::{messages, AppError};
use crate::models::{User, UserProfile};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Tokens are valid for 24 hours from issue.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Represents the claims encoded within a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user's id.
    pub id: i64,
    pub email: String,
    pub name: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

impl Claims {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// HS256 signing and verification keys derived from the deployment secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: chrono::Duration,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self::with_lifetime(secret, chrono::Duration::hours(TOKEN_LIFETIME_HOURS))
    }

    pub fn with_lifetime(secret: &str, lifetime: chrono::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    /// Issues a signed token embedding the user's id, email and name.
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.lifetime).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry and returns the embedded claims.
    ///
    /// Any failure is reported as `AppError::Forbidden` with the same message, whatever
    /// the underlying reason.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: 42,
            name: "Carla".to_string(),
            email: "carla@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        let keys = TokenKeys::new("test_secret_for_gen_verify");
        let token = keys.generate_token(&user()).unwrap();
        let claims = keys.verify_token(&token).unwrap();

        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "carla@example.com");
        assert_eq!(claims.name, "Carla");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_token_expiration() {
        let keys = TokenKeys::with_lifetime("test_secret_for_expiration", chrono::Duration::hours(-2));
        let expired_token = keys.generate_token(&user()).unwrap();

        match keys.verify_token(&expired_token) {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, messages::INVALID_TOKEN),
            other => panic!("Token should have been rejected as expired, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let token = TokenKeys::new("one_secret").generate_token(&user()).unwrap();

        let result = TokenKeys::new("a_completely_different_secret").verify_token(&token);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_malformed_token() {
        let keys = TokenKeys::new("secret");
        assert!(matches!(
            keys.verify_token("not-a-jwt"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
    }
}
