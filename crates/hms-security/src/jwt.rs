//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

/// Claims embedded in every issued token: the username as subject plus
/// the user id and role used for authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token issuer/verifier. The secret is injected once at startup from
/// configuration and never mutated afterwards.
pub struct JwtService {
    secret: String,
    token_expiry_hours: i64,
}

impl JwtService {
    pub fn new(secret: String, token_expiry_hours: i64) -> Self {
        Self {
            secret,
            token_expiry_hours,
        }
    }

    pub fn generate_token(&self, username: &str, user_id: &Uuid, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            user_id: *user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_expiry_hours)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::ValidationError(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret".to_string(), 24)
    }

    #[test]
    fn test_roundtrip_preserves_claims() {
        let user_id = Uuid::new_v4();
        let token = service()
            .generate_token("frontdesk", &user_id, "receptionist")
            .unwrap();

        let claims = service().validate_token(&token).unwrap();
        assert_eq!(claims.sub, "frontdesk");
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, "receptionist");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service()
            .generate_token("frontdesk", &Uuid::new_v4(), "admin")
            .unwrap();

        let other = JwtService::new("other-secret".to_string(), 24);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(service().validate_token("not.a.token").is_err());
    }
}
