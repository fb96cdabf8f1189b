//! Identity provider error types

use thiserror::Error;

use crate::blog::repository::StoreError;
use crate::blog::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum UserAuthError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("A user with that username already exists")]
    UsernameTaken,

    /// Unknown username and wrong password share one message
    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Invalid token format")]
    MalformedHeader,

    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<FieldErrors> for UserAuthError {
    fn from(errors: FieldErrors) -> Self {
        UserAuthError::Validation(errors)
    }
}
