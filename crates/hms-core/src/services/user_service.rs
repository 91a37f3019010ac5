//! User management and profile service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use hms_security::password::PasswordService;
use hms_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

use crate::domain::{User, UserRole};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Partial update; `None` means "leave unchanged". A present password
/// is re-hashed before storage.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct UserService<R: UserRepository> {
    user_repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn get(&self, id: &Uuid) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo.find_all().await
    }

    pub async fn list_customers(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo.find_by_role(UserRole::Customer).await
    }

    pub async fn update(&self, id: &Uuid, cmd: UpdateUserCommand) -> Result<User, DomainError> {
        let mut user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if let Some(username) = cmd.username {
            if username != user.username
                && self.user_repo.find_by_username(&username).await?.is_some()
            {
                return Err(DomainError::UsernameAlreadyExists(username));
            }
            user.username = username;
        }
        if let Some(email) = cmd.email {
            if email != user.email && self.user_repo.find_by_email(&email).await?.is_some() {
                return Err(DomainError::EmailAlreadyExists(email));
            }
            user.email = email;
        }
        if let Some(password) = cmd.password {
            user.password_hash = Self::hash_checked(&password)?;
        }

        user.touch();
        self.user_repo.update(&user).await
    }

    /// Change the caller's own password; the current password must
    /// verify first.
    pub async fn change_password(
        &self,
        id: &Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let mut user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let valid = PasswordService::verify(current_password, &user.password_hash)
            .map_err(|_e| DomainError::InvalidCredentials)?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        user.password_hash = Self::hash_checked(new_password)?;
        user.touch();
        self.user_repo.update(&user).await?;

        info!("Password changed for user {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        self.user_repo.delete(id).await
    }

    fn hash_checked(password: &str) -> Result<String, DomainError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooShort);
        }
        if password.len() > MAX_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooLong);
        }
        PasswordService::hash(password).map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn user_with_password(password: &str) -> User {
        let hash = PasswordService::hash(password).unwrap();
        User::new(
            "frontdesk".into(),
            hash,
            "desk@hotel.test".into(),
            UserRole::Receptionist,
        )
        .unwrap()
    }

    fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
        UserService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo)
            .update(&Uuid::new_v4(), UpdateUserCommand::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(user_with_password("oldpassword"))));
        repo.expect_update().returning(|user| {
            assert!(PasswordService::verify("newpassword", &user.password_hash).unwrap());
            Ok(user.clone())
        });

        service(repo)
            .update(
                &Uuid::new_v4(),
                UpdateUserCommand {
                    password: Some("newpassword".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(user_with_password("rightpassword"))));

        let err = service(repo)
            .change_password(&Uuid::new_v4(), "wrongpassword", "newpassword")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_delete_referenced_user_surfaces_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(user_with_password("rightpassword"))));
        repo.expect_delete()
            .returning(|_| Err(DomainError::UserHasReservations));

        let err = service(repo).delete(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::UserHasReservations));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(user_with_password("rightpassword"))));
        repo.expect_update().returning(|user| Ok(user.clone()));

        service(repo)
            .change_password(&Uuid::new_v4(), "rightpassword", "newpassword")
            .await
            .unwrap();
    }
}
