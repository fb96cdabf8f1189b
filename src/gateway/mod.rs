pub mod error;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::user_auth::middleware::jwt_auth_middleware;
use state::AppState;

/// Build the complete router
///
/// Every `/posts/...` route sits behind the JWT middleware; `/users/...`,
/// `/health` and the docs are public.
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // Auth Routes (no auth required)
    // ==========================================================================
    let auth_routes = Router::new()
        .route("/users/", post(crate::user_auth::handlers::register))
        .route("/users/login/", post(crate::user_auth::handlers::login))
        .route(
            "/users/token/refresh/",
            post(crate::user_auth::handlers::refresh),
        );

    // ==========================================================================
    // Blog Routes (JWT required)
    // ==========================================================================
    let blog_routes = Router::new()
        .route(
            "/posts/",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/posts/{id}/",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/posts/user/{username}/", get(handlers::list_user_posts))
        .route("/posts/{id}/upvote/", post(handlers::toggle_upvote))
        .route(
            "/posts/{id}/comments/",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(auth_routes)
        .merge(blog_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    // Bind address
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {}: {} (port {} may already be in use)",
            addr,
            e,
            port
        )
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
