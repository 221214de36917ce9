//! User domain models and DTOs.
//!
//! A user is stored as a [`UserRecord`] (including the password hash) and
//! exposed through the API as a [`User`], which never carries the password.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

/// A user as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// A user as returned by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: UserId,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
        }
    }
}

/// Request body for creating a user and for replacing one wholesale.
///
/// Updates are full replacements: every field is required on `PUT` too.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

impl fmt::Debug for UserPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// A validated user ready to be written, with the password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Response for create and update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "User created successfully")]
    pub message: String,
    pub user: User,
}
