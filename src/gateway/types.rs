//! API Response types, error codes and request extractors
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - `JsonBody<T>`: JSON extractor whose rejection uses the unified format
//! - `JsonPayload`: raw body, decoded later by the blog services
//! - `PostId`: `{id}` path segment; anything non-numeric is an unknown post

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

use crate::blog::BlogError;
use crate::blog::models::RecordId;
use crate::blog::validation::JsonPayload;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success), field errors (validation failure) or absent
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    /// Create error response carrying a payload (e.g. field errors)
    pub fn error_with(code: i32, msg: impl Into<String>, data: T) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: Some(data),
        }
    }
}

/// Confirmation returned by deletes
#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
    #[schema(example = 42)]
    pub id: i64,
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const VALIDATION_FAILED: i32 = 1002;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const NOT_OWNER: i32 = 2003;

    // Resource errors (4xxx)
    pub const POST_NOT_FOUND: i32 = 4001;
    pub const USER_NOT_FOUND: i32 = 4002;
    pub const CONFLICT: i32 = 4009;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// JsonBody: Axum Framework Integration
// ============================================================================

/// JSON body extractor.
///
/// Same as `axum::Json`, but malformed bodies are rejected with a 400 in the
/// unified response format. Field validation is left to the services so it
/// runs after existence and ownership checks.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

/// Rejection type for JsonBody
#[derive(Debug)]
pub struct JsonBodyRejection {
    pub message: String,
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(
            error_codes::INVALID_PARAMETER,
            self.message,
        ));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| JsonBodyRejection {
                message: format!("Invalid JSON: {}", e.body_text()),
            })?;
        Ok(JsonBody(value))
    }
}

// ============================================================================
// Blog extractors
// ============================================================================

/// Any content type is accepted. Parsing waits until the post has been
/// found and the caller cleared to act on it.
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonBodyRejection {
                message: format!("Invalid request body: {}", e.body_text()),
            })?;
        Ok(JsonPayload::new(bytes.to_vec()))
    }
}

/// Post id from the `{id}` path segment
#[derive(Debug, Clone, Copy)]
pub struct PostId(pub RecordId);

impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = BlogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<RecordId>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Unparseable post id: {}", e.body_text());
                BlogError::PostNotFound
            })?;
        Ok(PostId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(json, serde_json::json!({"code": 0, "msg": "ok", "data": 5}));
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let json =
            serde_json::to_value(ApiResponse::<()>::error(error_codes::POST_NOT_FOUND, "Post not found"))
                .unwrap();
        assert_eq!(json, serde_json::json!({"code": 4001, "msg": "Post not found"}));
    }

    #[tokio::test]
    async fn test_payload_extractor_ignores_content_type() {
        let req = Request::builder()
            .uri("/posts/1/")
            .body(axum::body::Body::from(r#"{"title": "T"}"#))
            .unwrap();
        let payload = JsonPayload::from_request(req, &()).await.unwrap();
        let update: crate::blog::validation::UpdatePostRequest = payload.decode().unwrap();
        assert_eq!(update.title.as_deref(), Some("T"));
    }
}
