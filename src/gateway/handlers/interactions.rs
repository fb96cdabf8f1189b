//! Upvote and comment handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};

use crate::blog::BlogError;
use crate::blog::models::{Comment, Post};
use crate::blog::validation::{CreateCommentRequest, JsonPayload};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, PostId};
use crate::user_auth::AuthUser;

/// Toggle the caller's upvote
///
/// POST /posts/{id}/upvote/
///
/// First call adds an upvote, the next removes it.
#[utoipa::path(
    post,
    path = "/posts/{id}/upvote/",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with updated upvote_count", body = ApiResponse<Post>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Upvotes"
)]
pub async fn toggle_upvote(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PostId(id): PostId,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), BlogError> {
    let post = state.upvotes.toggle(id, user.id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(post))))
}

/// List comments on a post
///
/// GET /posts/{id}/comments/
#[utoipa::path(
    get,
    path = "/posts/{id}/comments/",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments, oldest first", body = ApiResponse<Vec<Comment>>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Comment>>>), BlogError> {
    let comments = state.comments.list(id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(comments))))
}

/// Comment on a post
///
/// POST /posts/{id}/comments/
#[utoipa::path(
    post,
    path = "/posts/{id}/comments/",
    params(("id" = i64, Path, description = "Post id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<Comment>),
        (status = 400, description = "Field validation failed"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PostId(id): PostId,
    payload: JsonPayload,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), BlogError> {
    let comment = state.comments.create(id, user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}
