//! User domain models and DTOs.
//!
//! Roles are stored as plain strings (`user`, `mentor`, `admin`) on the
//! `users` row; [`UserRole`] is the typed view over that column.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Mentor,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Mentor, UserRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Mentor => "mentor",
            UserRole::Admin => "admin",
        }
    }

    /// Exact, case-sensitive match against the stored role strings.
    pub fn parse(role: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == role)
    }

    pub fn is_valid_role(role: &str) -> bool {
        Self::parse(role).is_some()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid role: {}", s))
    }
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if UserRole::is_valid_role(role) {
        Ok(())
    } else {
        Err(ValidationError::new("role")
            .with_message("role must be one of: user, mentor, admin".into()))
    }
}

/// A user account.
///
/// The password hash is loaded with the row but never serialized.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub nip: String,
    #[serde(skip)]
    pub password: String,
    pub is_active: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.role().is_some_and(|r| roles.contains(&r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    pub fn is_mentor(&self) -> bool {
        self.has_role(UserRole::Mentor)
    }

    pub fn is_user(&self) -> bool {
        self.has_role(UserRole::User)
    }
}

/// Admin-side account creation; unlike registration the role is chosen.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(equal = 12, message = "nip must be exactly 12 characters"))]
    pub nip: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub is_active: Option<bool>,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub offset: i64,
    pub limit: i64,
    pub count: usize,
}
