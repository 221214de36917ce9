use axum::{
    Json,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use rollcall_core::{AppError, ErrorBody};
use rollcall_models::{LoginRequest, LoginResponse};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Builds the `Set-Cookie` value delivering the session token.
pub fn session_cookie(token: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Expires={}",
        SESSION_COOKIE,
        token,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// Login and receive a session token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; the token is also set as the `token` cookie", body = LoginResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let issued = AuthService::login(
        state.store.as_ref(),
        dto,
        &state.jwt_config,
        &state.dummy_hash,
    )
    .await?;
    let expires = issued.claims.expires_at();

    let cookie = session_cookie(&issued.token, expires);
    let body = LoginResponse {
        message: "Login successful".to_string(),
        token: issued.token,
        expires,
    };

    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(body)))
}
