use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use rollcall_core::{AppError, ErrorBody};
use rollcall_models::{User, UserId, UserPayload, UserResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Parses a path identifier. Runs before any store access.
pub fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse().map_err(|_| AppError::bad_request("Invalid ID"))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID (UUID)")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(caller = %auth_user.email()))]
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let id = parse_user_id(&id)?;
    let user = UserService::get_user(state.store.as_ref(), id).await?;
    Ok(Json(user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(caller = %auth_user.email()))]
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UserPayload>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user =
        UserService::create_user(state.store.as_ref(), dto, state.password_config.cost).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// Replace a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID (UUID)")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid ID or validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(caller = %auth_user.email()))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UserPayload>,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_user_id(&id)?;
    let user =
        UserService::update_user(state.store.as_ref(), id, dto, state.password_config.cost)
            .await?;
    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID (UUID)")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(caller = %auth_user.email()))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_user_id(&id)?;
    UserService::delete_user(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
