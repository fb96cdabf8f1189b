use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::error::UserAuthError;
use crate::gateway::state::AppState;

/// Require `Authorization: Bearer <access token>` and inject the caller as
/// an [`super::AuthUser`] request extension.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, UserAuthError> {
    // 1. Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(UserAuthError::MissingToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(UserAuthError::MalformedHeader)?;

    // 2. Verify token
    let user = state.user_auth.authenticate(token).await.inspect_err(|e| {
        tracing::debug!("Bearer token rejected: {}", e);
    })?;

    // 3. Inject caller identity
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
