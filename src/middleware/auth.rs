use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use rollcall_auth::{Claims, verify_token};
use rollcall_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and provides the caller's claims.
///
/// Handlers that take an `AuthUser` are only reached with a verified,
/// unexpired token; every failure is rejected with `401` before the handler
/// body runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The authenticated user's email
    pub fn email(&self) -> &str {
        self.0.email()
    }
}

/// Pulls the token out of an `Authorization` value.
///
/// The value must be exactly two whitespace-separated parts, the first of
/// which is the literal `Bearer`.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized("Authorization header is required"))?;

        let token = auth_header
            .to_str()
            .ok()
            .and_then(extract_bearer_token)
            .ok_or_else(|| AppError::unauthorized("Invalid authorization token"))?;

        let claims = verify_token(token, &state.jwt_config).map_err(|err| {
            debug!(reason = %err, "Rejected bearer token");
            AppError::from(err)
        })?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::{Request, StatusCode};
    use rollcall_auth::{create_token, encode_claims};
    use rollcall_config::JwtConfig;
    use rollcall_db::MemoryUserStore;

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(MemoryUserStore::new()),
            JwtConfig {
                secret: "test-secret-key-at-least-32-characters-long".to_string(),
                token_expiry: 86_400,
            },
        )
    }

    async fn extract(state: &AppState, authorization: Option<&str>) -> Result<AuthUser, AppError> {
        let mut builder = Request::builder().uri("/api/users");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Bearer   abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token("bearer abc"), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer abc extra"), None);
        assert_eq!(extract_bearer_token("abc"), None);
        assert_eq!(extract_bearer_token(""), None);
    }

    #[tokio::test]
    async fn test_valid_token_yields_claims() {
        let state = test_state();
        let issued = create_token("a@x.com", &state.jwt_config).unwrap();

        let auth_user = extract(&state, Some(&format!("Bearer {}", issued.token)))
            .await
            .unwrap();

        assert_eq!(auth_user.email(), "a@x.com");
        assert_eq!(auth_user.0, issued.claims);
    }

    #[tokio::test]
    async fn test_missing_header() {
        let err = extract(&test_state(), None).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "Authorization header is required");
    }

    #[tokio::test]
    async fn test_malformed_scheme() {
        let state = test_state();
        let issued = create_token("a@x.com", &state.jwt_config).unwrap();

        for value in [
            issued.token.clone(),
            format!("Token {}", issued.token),
            format!("Bearer {} extra", issued.token),
        ] {
            let err = extract(&state, Some(&value)).await.unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(err.public_message(), "Invalid authorization token");
        }
    }

    #[tokio::test]
    async fn test_expired_token() {
        let state = test_state();
        let claims = Claims {
            sub: "a@x.com".to_string(),
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode_claims(&claims, state.jwt_config.secret.as_bytes()).unwrap();

        let err = extract(&state, Some(&format!("Bearer {}", token)))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "Invalid token");
    }

    #[tokio::test]
    async fn test_token_from_other_secret() {
        let state = test_state();
        let other = JwtConfig {
            secret: "some-other-secret-at-least-32-characters".to_string(),
            token_expiry: 86_400,
        };
        let issued = create_token("a@x.com", &other).unwrap();

        let err = extract(&state, Some(&format!("Bearer {}", issued.token)))
            .await
            .unwrap_err();

        assert_eq!(err.public_message(), "Invalid token");
    }
}
