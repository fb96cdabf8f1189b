//! Blog core error types

use thiserror::Error;

use super::repository::StoreError;
use super::validation::FieldErrors;

/// What the caller attempted when an ownership check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Edit,
    Delete,
}

impl PostAction {
    pub fn verb(self) -> &'static str {
        match self {
            PostAction::Edit => "edit",
            PostAction::Delete => "delete",
        }
    }
}

/// Errors returned by the post, upvote and comment services
///
/// Checks run in a fixed order: existence, then ownership, then field
/// validation.
#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Post not found")]
    PostNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("You are not authorized to {} this post", .0.verb())]
    NotOwner(PostAction),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<FieldErrors> for BlogError {
    fn from(errors: FieldErrors) -> Self {
        BlogError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_owner_message() {
        assert_eq!(
            BlogError::NotOwner(PostAction::Edit).to_string(),
            "You are not authorized to edit this post"
        );
        assert_eq!(
            BlogError::NotOwner(PostAction::Delete).to_string(),
            "You are not authorized to delete this post"
        );
    }

    #[test]
    fn test_store_error_converts() {
        let err: BlogError = StoreError::Backend("boom".to_string()).into();
        assert!(matches!(err, BlogError::Store(_)));
    }
}
