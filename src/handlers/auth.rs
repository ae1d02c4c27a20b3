use axum::{
    extract::{Form, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{require_admin, CurrentUser},
    entities::user::{self, UserRole},
    errors::ServiceError,
    handlers::common::{created_response, validate_input},
    services::users::RegisterUser,
    ApiResponse, ApiResult, AppState,
};

/// Build the auth Router scoped under `/api/v1/auth`.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/me", get(me))
        .route("/change-password", post(change_password))
        .route("/refresh", post(refresh))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Access token envelope returned by login and refresh.
#[derive(Debug, Serialize, ToSchema)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "frontdesk",
    "email": "frontdesk@example.com",
    "password": "changeme1",
    "full_name": "Front Desk",
    "role": "receptionist"
}))]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    pub full_name: String,
    pub role: UserRole,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 6, message = "New password must be at least 6 characters long"))]
    pub new_password: String,
}

/// Authenticate with form credentials and receive an access token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<Token>),
        (status = 400, description = "Inactive account", body = crate::errors::ErrorResponse),
        (status = 401, description = "Bad credentials", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> ApiResult<Token> {
    let user = state
        .services
        .users
        .authenticate(&payload.username, &payload.password)
        .await?;

    let (access_token, expires_in) = state.auth.generate_token(&user.username)?;

    Ok(Json(ApiResponse::success(Token {
        access_token,
        token_type: "bearer".to_string(),
        expires_in,
        user: user.into(),
    })))
}

/// Register a new staff account (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Duplicate username or email", body = crate::errors::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_admin(&current)?;
    validate_input(&payload)?;

    let user = state
        .services
        .users
        .register(
            RegisterUser {
                username: payload.username,
                email: payload.email,
                password: payload.password,
                full_name: payload.full_name,
                role: payload.role,
                is_active: payload.is_active,
            },
            Some(current.id),
        )
        .await?;

    Ok(created_response(UserResponse::from(user)))
}

/// Current user information.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn me(CurrentUser(current): CurrentUser) -> ApiResult<UserResponse> {
    Ok(Json(ApiResponse::success(current.into())))
}

/// Change the caller's password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Incorrect current password", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    validate_input(&payload)?;

    state
        .services
        .users
        .change_password(current, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::success(
        json!({ "message": "Password changed successfully" }),
    )))
}

/// Issue a fresh token for the current user.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<Token>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> ApiResult<Token> {
    let (access_token, expires_in) = state.auth.generate_token(&current.username)?;

    Ok(Json(ApiResponse::success(Token {
        access_token,
        token_type: "bearer".to_string(),
        expires_in,
        user: current.into(),
    })))
}
