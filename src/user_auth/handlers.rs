use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::error::UserAuthError;
use super::service::{AccessToken, LoginRequest, RefreshRequest, RegisterRequest, TokenPair};
use crate::blog::models::UserInfo;
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, JsonBody},
};

/// Register a new user
///
/// POST /users/
#[utoipa::path(
    post,
    path = "/users/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserInfo>),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already exists")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), UserAuthError> {
    let user = state.user_auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// Login user
///
/// POST /users/login/
#[utoipa::path(
    post,
    path = "/users/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenPair>>), UserAuthError> {
    let username = req.username.clone();
    match state.user_auth.login(req).await {
        Ok(pair) => {
            tracing::info!(%username, "Login succeeded");
            Ok((StatusCode::OK, Json(ApiResponse::success(pair))))
        }
        Err(e) => {
            tracing::warn!(%username, "Login failed: {}", e);
            Err(e)
        }
    }
}

/// Refresh access token
///
/// POST /users/token/refresh/
#[utoipa::path(
    post,
    path = "/users/token/refresh/",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = ApiResponse<AccessToken>),
        (status = 401, description = "Refresh token invalid or expired")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccessToken>>), UserAuthError> {
    let token = state.user_auth.refresh(req).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(token))))
}
