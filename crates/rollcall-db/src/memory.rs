//! In-process [`UserStore`].
//!
//! Keeps records in insertion order behind an async `RwLock` and enforces the
//! same email uniqueness as the PostgreSQL unique index. Used by the test
//! suite and when the server starts without `DATABASE_URL`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use rollcall_models::{NewUser, UserId, UserRecord};

use crate::store::{StoreError, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        let record = UserRecord {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        };
        users.push(record.clone());

        Ok(record)
    }

    async fn replace(&self, id: UserId, user: NewUser) -> Result<Option<UserRecord>, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email && u.id != id) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        let Some(existing) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        *existing = UserRecord {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        };

        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);

        Ok(users.len() < before)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_identifier() {
        let store = MemoryUserStore::new();

        let first = store.insert(new_user("Ada", "ada@x.com")).await.unwrap();
        let second = store.insert(new_user("Bob", "bob@x.com")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.find_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryUserStore::new();
        store.insert(new_user("Ada", "ada@x.com")).await.unwrap();
        store.insert(new_user("Bob", "bob@x.com")).await.unwrap();

        let emails: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();

        assert_eq!(emails, vec!["ada@x.com", "bob@x.com"]);
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let store = MemoryUserStore::new();
        store.insert(new_user("Ada", "ada@x.com")).await.unwrap();

        assert!(store.find_by_email("ada@x.com").await.unwrap().is_some());
        assert!(store.find_by_email("ADA@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        store.insert(new_user("Ada", "ada@x.com")).await.unwrap();

        let err = store.insert(new_user("Ada 2", "ada@x.com")).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail(email) if email == "ada@x.com"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_identifier() {
        let store = MemoryUserStore::new();
        let ada = store.insert(new_user("Ada", "ada@x.com")).await.unwrap();

        let replaced = store
            .replace(ada.id, new_user("Ada L.", "lovelace@x.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.id, ada.id);
        assert_eq!(replaced.name, "Ada L.");
        assert!(store.find_by_email("ada@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_may_keep_own_email() {
        let store = MemoryUserStore::new();
        let ada = store.insert(new_user("Ada", "ada@x.com")).await.unwrap();

        let replaced = store.replace(ada.id, new_user("Ada L.", "ada@x.com")).await;

        assert!(matches!(replaced, Ok(Some(_))));
    }

    #[tokio::test]
    async fn test_replace_rejects_email_of_other_user() {
        let store = MemoryUserStore::new();
        store.insert(new_user("Ada", "ada@x.com")).await.unwrap();
        let bob = store.insert(new_user("Bob", "bob@x.com")).await.unwrap();

        let result = store.replace(bob.id, new_user("Bob", "ada@x.com")).await;

        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_replace_missing_returns_none() {
        let store = MemoryUserStore::new();

        let result = store
            .replace(UserId::new(), new_user("Ghost", "ghost@x.com"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryUserStore::new();
        let ada = store.insert(new_user("Ada", "ada@x.com")).await.unwrap();

        assert!(!store.delete(UserId::new()).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);

        assert!(store.delete(ada.id).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[test]
    fn test_store_errors_map_to_status() {
        use rollcall_core::AppError;

        let conflict = AppError::from(StoreError::DuplicateEmail("a@x.com".to_string()));
        assert_eq!(conflict.status.as_u16(), 409);

        let internal = AppError::from(StoreError::Unavailable("down".to_string()));
        assert_eq!(internal.status.as_u16(), 500);
    }
}
