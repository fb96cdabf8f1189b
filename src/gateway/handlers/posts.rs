//! Post handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::blog::BlogError;
use crate::blog::models::Post;
use crate::blog::validation::{CreatePostRequest, JsonPayload, UpdatePostRequest};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, Deleted, PostId};
use crate::user_auth::AuthUser;

type PostResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), BlogError>;

/// List all posts
///
/// GET /posts/
#[utoipa::path(
    get,
    path = "/posts/",
    responses(
        (status = 200, description = "All posts", body = ApiResponse<Vec<Post>>),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn list_posts(State(state): State<Arc<AppState>>) -> PostResult<Vec<Post>> {
    let posts = state.posts.list().await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(posts))))
}

/// Create a post owned by the caller
///
/// POST /posts/
#[utoipa::path(
    post,
    path = "/posts/",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<Post>),
        (status = 400, description = "Field validation failed"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: JsonPayload,
) -> PostResult<Post> {
    let post = state.posts.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(post))))
}

/// Get a post
///
/// GET /posts/{id}/
#[utoipa::path(
    get,
    path = "/posts/{id}/",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = ApiResponse<Post>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
) -> PostResult<Post> {
    let post = state.posts.get(id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(post))))
}

/// Update title and/or body of the caller's post
///
/// PUT /posts/{id}/
#[utoipa::path(
    put,
    path = "/posts/{id}/",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post", body = ApiResponse<Post>),
        (status = 400, description = "Field validation failed"),
        (status = 401, description = "Caller is not the owner"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PostId(id): PostId,
    payload: JsonPayload,
) -> PostResult<Post> {
    let post = state.posts.update(id, user.id, payload).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(post))))
}

/// Delete the caller's post (with its upvotes and comments)
///
/// DELETE /posts/{id}/
#[utoipa::path(
    delete,
    path = "/posts/{id}/",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = ApiResponse<Deleted>),
        (status = 401, description = "Caller is not the owner"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    PostId(id): PostId,
) -> PostResult<Deleted> {
    state.posts.delete(id, user.id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(Deleted { id }))))
}

/// List posts by username
///
/// GET /posts/user/{username}/
#[utoipa::path(
    get,
    path = "/posts/user/{username}/",
    params(("username" = String, Path, description = "Author's username")),
    responses(
        (status = 200, description = "The user's posts", body = ApiResponse<Vec<Post>>),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn list_user_posts(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> PostResult<Vec<Post>> {
    let posts = state.posts.list_by_username(&username).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(posts))))
}
