use tracing::{info, instrument, warn};

use rollcall_auth::{IssuedToken, create_token};
use rollcall_config::JwtConfig;
use rollcall_core::{AppError, DummyHash, verify_password};
use rollcall_db::UserStore;
use rollcall_models::LoginRequest;

use crate::metrics::{track_login_failure, track_login_success, track_token_issued};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthService;

impl AuthService {
    /// Verifies `dto` against the store and issues a session token.
    ///
    /// An unknown email and a wrong password produce the same error and
    /// both pay for one bcrypt verification; only the log line and the
    /// failure metric tell them apart.
    #[instrument(skip(store, dto, jwt_config, dummy_hash), fields(email = %dto.email))]
    pub async fn login(
        store: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
        dummy_hash: &DummyHash,
    ) -> Result<IssuedToken, AppError> {
        let Some(user) = store.find_by_email(&dto.email).await? else {
            dummy_hash.verify(&dto.password)?;
            warn!("Login failed: no user with that email");
            track_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: password mismatch");
            track_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let issued = create_token(&user.email, jwt_config)?;

        info!(user_id = %user.id, "Login successful");
        track_login_success();
        track_token_issued();

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rollcall_auth::verify_token;
    use rollcall_core::hash_password_with_cost;
    use std::time::{Duration, Instant};
    use rollcall_db::MemoryUserStore;
    use rollcall_models::NewUser;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 86_400,
        }
    }

    async fn store_with(email: &str, password: &str) -> MemoryUserStore {
        store_with_cost(email, password, 4).await
    }

    async fn store_with_cost(email: &str, password: &str, cost: u32) -> MemoryUserStore {
        let store = MemoryUserStore::new();
        store
            .insert(NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: hash_password_with_cost(password, cost).unwrap(),
            })
            .await
            .unwrap();
        store
    }

    fn credentials(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_for_email() {
        let store = store_with("a@x.com", "p").await;
        let config = jwt_config();
        let dummy_hash = DummyHash::new(4);

        let issued = AuthService::login(&store, credentials("a@x.com", "p"), &config, &dummy_hash)
            .await
            .unwrap();

        let claims = verify_token(&issued.token, &config).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let store = store_with("a@x.com", "p").await;
        let config = jwt_config();
        let dummy_hash = DummyHash::new(4);

        let unknown =
            AuthService::login(&store, credentials("b@x.com", "p"), &config, &dummy_hash)
                .await
                .unwrap_err();
        let mismatch =
            AuthService::login(&store, credentials("a@x.com", "wrong"), &config, &dummy_hash)
                .await
                .unwrap_err();

        assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
        assert_eq!(mismatch.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.public_message(), mismatch.public_message());
        assert_eq!(unknown.public_message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let store = store_with("a@x.com", "p").await;

        let dummy_hash = DummyHash::new(4);

        let err = AuthService::login(
            &store,
            credentials("A@x.com", "p"),
            &jwt_config(),
            &dummy_hash,
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    async fn average_failed_login(
        store: &MemoryUserStore,
        dummy_hash: &DummyHash,
        email: &str,
        rounds: u32,
    ) -> Duration {
        let config = jwt_config();
        let started = Instant::now();
        for _ in 0..rounds {
            AuthService::login(store, credentials(email, "wrong"), &config, dummy_hash)
                .await
                .unwrap_err();
        }
        started.elapsed() / rounds
    }

    #[tokio::test]
    async fn test_unknown_email_costs_a_bcrypt_verification() {
        let store = store_with_cost("a@x.com", "p", 6).await;
        let dummy_hash = DummyHash::new(6);
        dummy_hash.prime().unwrap();

        let unknown = average_failed_login(&store, &dummy_hash, "b@x.com", 5).await;
        let mismatch = average_failed_login(&store, &dummy_hash, "a@x.com", 5).await;

        assert!(
            unknown * 3 >= mismatch,
            "unknown email took {unknown:?}, wrong password took {mismatch:?}"
        );
    }
}
