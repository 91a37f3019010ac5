//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Staff/customer role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Receptionist,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Receptionist => "receptionist",
            UserRole::Customer => "customer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "receptionist" => Some(UserRole::Receptionist),
            "customer" => Some(UserRole::Customer),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(length(min = 3, max = 64))]
    pub username: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    #[validate(email)]
    pub email: String,

    pub role: UserRole,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        password_hash: String,
        email: String,
        role: UserRole,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let user = Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            email,
            role,
            created_at: now,
            updated_at: now,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Receptionist, UserRole::Customer] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("manager"), None);
        assert_eq!(UserRole::from_str("Admin"), None);
    }

    #[test]
    fn test_new_user_validates_email() {
        let user = User::new(
            "frontdesk".into(),
            "hash".into(),
            "not-an-email".into(),
            UserRole::Receptionist,
        );
        assert!(user.is_err());
    }

    #[test]
    fn test_new_user_validates_username_length() {
        let user = User::new(
            "ab".into(),
            "hash".into(),
            "desk@hotel.test".into(),
            UserRole::Receptionist,
        );
        assert!(user.is_err());
    }
}
