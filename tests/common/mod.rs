use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;

use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_auth::create_token;
use rollcall_config::{JwtConfig, PasswordConfig};
use rollcall_core::hash_password_with_cost;
use rollcall_db::{MemoryUserStore, StoreError, UserStore};
use rollcall_models::{NewUser, UserId, UserRecord};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 86_400,
    }
}

/// Router over `store` with a fixed signing key and the cheapest bcrypt cost.
pub fn setup_test_app(store: Arc<dyn UserStore>) -> Router {
    setup_test_app_with_cost(store, 4)
}

#[allow(dead_code)]
pub fn setup_test_app_with_cost(store: Arc<dyn UserStore>, cost: u32) -> Router {
    let state =
        AppState::new(store, test_jwt_config()).with_password_config(PasswordConfig { cost });
    init_router(state)
}

#[allow(dead_code)]
pub async fn create_test_user(
    store: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> UserRecord {
    create_test_user_with_cost(store, name, email, password, 4).await
}

#[allow(dead_code)]
pub async fn create_test_user_with_cost(
    store: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
    cost: u32,
) -> UserRecord {
    store
        .insert(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password_with_cost(password, cost).unwrap(),
        })
        .await
        .unwrap()
}

/// `Authorization` header value for a fresh token issued to `email`.
#[allow(dead_code)]
pub fn bearer_for(email: &str) -> String {
    let issued = create_token(email, &test_jwt_config()).unwrap();
    format!("Bearer {}", issued.token)
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Memory store that counts every call made to it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryUserStore,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.hit();
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        self.hit();
        self.inner.find_by_email(email).await
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        self.hit();
        self.inner.insert(user).await
    }

    async fn replace(&self, id: UserId, user: NewUser) -> Result<Option<UserRecord>, StoreError> {
        self.hit();
        self.inner.replace(id, user).await
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        self.hit();
        self.inner.delete(id).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.hit();
        self.inner.count().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.hit();
        self.inner.ping().await
    }
}

/// Store whose every operation fails: panics on reads, errors on writes.
#[allow(dead_code)]
pub struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        panic!("store exploded while listing users");
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<UserRecord>, StoreError> {
        panic!("store exploded while fetching a user");
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert(&self, _user: NewUser) -> Result<UserRecord, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn replace(&self, _id: UserId, _user: NewUser) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _id: UserId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
