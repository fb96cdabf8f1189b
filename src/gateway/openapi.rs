//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8000/docs`
//! - OpenAPI JSON: `http://localhost:8000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::blog::models::{Comment, Post, UserInfo};
use crate::blog::validation::{
    CreateCommentRequest, CreatePostRequest, FieldErrors, UpdatePostRequest,
};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::Deleted;
use crate::user_auth::service::{
    AccessToken, LoginRequest, RefreshRequest, RegisterRequest, TokenPair,
};

/// JWT bearer security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            // Access token from POST /users/login/ or /users/token/refresh/
            let scheme = HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .build();
            components.add_security_scheme("bearer_auth", SecurityScheme::Http(scheme));
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quillboard Blog API",
        version = "1.0.0",
        description = "Posts, upvotes and comments behind JWT authentication.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::refresh,
        crate::gateway::handlers::posts::list_posts,
        crate::gateway::handlers::posts::create_post,
        crate::gateway::handlers::posts::get_post,
        crate::gateway::handlers::posts::update_post,
        crate::gateway::handlers::posts::delete_post,
        crate::gateway::handlers::posts::list_user_posts,
        crate::gateway::handlers::interactions::toggle_upvote,
        crate::gateway::handlers::interactions::list_comments,
        crate::gateway::handlers::interactions::create_comment,
    ),
    components(
        schemas(
            HealthResponse,
            Post,
            Comment,
            UserInfo,
            Deleted,
            FieldErrors,
            CreatePostRequest,
            UpdatePostRequest,
            CreateCommentRequest,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            TokenPair,
            AccessToken,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Health"),
        (name = "Auth", description = "Registration and tokens"),
        (name = "Posts", description = "Post CRUD"),
        (name = "Upvotes", description = "Upvote toggle"),
        (name = "Comments", description = "Comments on posts"),
    )
)]
pub struct ApiDoc;
