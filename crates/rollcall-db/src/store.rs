//! The [`UserStore`] abstraction and its error type.

use async_trait::async_trait;
use thiserror::Error;

use rollcall_core::AppError;
use rollcall_models::{NewUser, UserId, UserRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => AppError::conflict("Email already in use"),
            other => AppError::internal(other),
        }
    }
}

/// Persistence for user records.
///
/// Lookups return `Ok(None)` for a missing record; `Err` is reserved for
/// store faults. `replace` and `delete` report whether a record matched.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;

    /// Exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Inserts a user; the store assigns the identifier.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Overwrites every field of the user with `id`, keeping the identifier.
    async fn replace(&self, id: UserId, user: NewUser) -> Result<Option<UserRecord>, StoreError>;

    async fn delete(&self, id: UserId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
