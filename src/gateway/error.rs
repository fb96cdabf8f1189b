//! HTTP mapping for service errors
//!
//! | Error | Status | Code |
//! |---|---|---|
//! | post / user missing | 404 | 4001 / 4002 |
//! | not the owner | 401 | 2003 |
//! | field validation | 400 | 1002 (+ field map) |
//! | missing / bad token, bad login | 401 | 2001 / 2002 |
//! | duplicate username | 409 | 4009 |
//! | storage, hashing, encoding | 500 | 5000 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::{ApiResponse, error_codes};
use crate::blog::BlogError;
use crate::blog::validation::FieldErrors;
use crate::user_auth::UserAuthError;

fn reply(status: StatusCode, code: i32, msg: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(code, msg))).into_response()
}

fn validation_reply(errors: FieldErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error_with(
            error_codes::VALIDATION_FAILED,
            "Validation failed",
            errors,
        )),
    )
        .into_response()
}

fn internal_reply(err: &dyn std::error::Error) -> Response {
    tracing::error!("Request failed: {}", err);
    reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "Internal server error",
    )
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        match self {
            BlogError::PostNotFound => reply(
                StatusCode::NOT_FOUND,
                error_codes::POST_NOT_FOUND,
                self.to_string(),
            ),
            BlogError::UserNotFound => reply(
                StatusCode::NOT_FOUND,
                error_codes::USER_NOT_FOUND,
                self.to_string(),
            ),
            BlogError::NotOwner(_) => reply(
                StatusCode::UNAUTHORIZED,
                error_codes::NOT_OWNER,
                self.to_string(),
            ),
            BlogError::Validation(errors) => validation_reply(errors),
            BlogError::Store(ref e) => internal_reply(e),
        }
    }
}

impl IntoResponse for UserAuthError {
    fn into_response(self) -> Response {
        match self {
            UserAuthError::Validation(errors) => validation_reply(errors),
            UserAuthError::UsernameTaken => {
                reply(StatusCode::CONFLICT, error_codes::CONFLICT, self.to_string())
            }
            UserAuthError::MissingToken => reply(
                StatusCode::UNAUTHORIZED,
                error_codes::MISSING_AUTH,
                self.to_string(),
            ),
            UserAuthError::InvalidCredentials
            | UserAuthError::MalformedHeader
            | UserAuthError::InvalidToken => reply(
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                self.to_string(),
            ),
            UserAuthError::Hashing(_) | UserAuthError::Encoding(_) | UserAuthError::Store(_) => {
                internal_reply(&self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::error::PostAction;
    use crate::blog::repository::StoreError;

    #[test]
    fn test_blog_error_status() {
        assert_eq!(
            BlogError::PostNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BlogError::UserNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BlogError::NotOwner(PostAction::Edit).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BlogError::Validation(FieldErrors::new())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BlogError::Store(StoreError::Backend("down".to_string()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_status() {
        assert_eq!(
            UserAuthError::MissingToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UserAuthError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UserAuthError::UsernameTaken.into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
