//! Authentication service with register, login, and token issuance

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use hms_security::jwt::JwtService;
use hms_security::password::PasswordService;
use hms_shared::constants::{
    MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};

use crate::domain::{User, UserRole};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Authentication service for register/login flows.
pub struct AuthService<R: UserRepository> {
    user_repo: Arc<R>,
    jwt_secret: String,
    token_expiry_hours: i64,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repo: Arc<R>, jwt_secret: String, token_expiry_hours: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Register a new user. The role must be one of the known roles;
    /// the password is hashed before it ever reaches the repository.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        role: &str,
    ) -> Result<UserInfo, DomainError> {
        info!("Registration attempt for username: {}", username);

        let role = UserRole::from_str(role)
            .ok_or_else(|| DomainError::InvalidRole(role.to_string()))?;

        if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
            return Err(DomainError::ValidationError(format!(
                "username must be between {} and {} characters",
                MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
            )));
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooShort);
        }
        if password.len() > MAX_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooLong);
        }

        if self.user_repo.find_by_username(username).await?.is_some() {
            warn!("Registration failed: username already exists: {}", username);
            return Err(DomainError::UsernameAlreadyExists(username.to_string()));
        }

        if self.user_repo.find_by_email(email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", email);
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = PasswordService::hash(password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let user = User::new(username.to_string(), password_hash, email.to_string(), role)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.user_repo.create(&user).await?;

        info!("Registration successful for: {}", username);
        Ok(UserInfo::from(&created))
    }

    /// Login with username and password. Failure never reveals whether
    /// the username or the password was wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for username: {}", username);

        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: username not found: {}", username);
                DomainError::InvalidCredentials
            })?;

        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_e| DomainError::InvalidCredentials)?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        let jwt_service = JwtService::new(self.jwt_secret.clone(), self.token_expiry_hours);
        let token = jwt_service
            .generate_token(&user.username, &user.id, user.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!("Login successful for: {}", username);

        Ok(LoginResult {
            user: UserInfo::from(&user),
            token,
        })
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub token: String,
}

/// User info returned in auth responses
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn existing_user(username: &str, password: &str) -> User {
        let hash = PasswordService::hash(password).unwrap();
        User::new(
            username.to_string(),
            hash,
            format!("{}@hotel.test", username),
            UserRole::Receptionist,
        )
        .unwrap()
    }

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(repo), "test-secret".into(), 24)
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let repo = MockUserRepository::new();
        let err = service(repo)
            .register("frontdesk", "longenough", "desk@hotel.test", "manager")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRole(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_short_username() {
        let repo = MockUserRepository::new();
        let err = service(repo)
            .register("fd", "longenough", "desk@hotel.test", "customer")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let repo = MockUserRepository::new();
        let err = service(repo)
            .register("frontdesk", "short", "desk@hotel.test", "customer")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PasswordTooShort));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(existing_user(name, "longenough"))));

        let err = service(repo)
            .register("frontdesk", "longenough", "desk@hotel.test", "customer")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UsernameAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|user| {
            assert_ne!(user.password_hash, "longenough");
            Ok(user.clone())
        });

        let info = service(repo)
            .register("frontdesk", "longenough", "desk@hotel.test", "receptionist")
            .await
            .unwrap();
        assert_eq!(info.username, "frontdesk");
        assert_eq!(info.role, UserRole::Receptionist);
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(existing_user(name, "longenough"))));

        let result = service(repo).login("frontdesk", "longenough").await.unwrap();
        assert!(!result.token.is_empty());

        let claims = JwtService::new("test-secret".into(), 24)
            .validate_token(&result.token)
            .unwrap();
        assert_eq!(claims.sub, "frontdesk");
        assert_eq!(claims.role, "receptionist");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(existing_user(name, "longenough"))));

        let err = service(repo).login("frontdesk", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let err = service(repo).login("ghost", "whatever").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }
}
