//! Data records for the blog core
//!
//! Plain data only. Persistence lives behind [`super::repository`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Primary key type shared by every record
pub type RecordId = i64;

// ============================================================================
// User
// ============================================================================

/// Registered user account
///
/// Owned by the identity provider. The blog core only reads it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub email: Option<String>,
    /// Argon2 PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user (no credentials)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserInfo {
    #[schema(example = 1)]
    pub id: RecordId,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Fields required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

// ============================================================================
// Post
// ============================================================================

/// A user-authored article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, sqlx::FromRow)]
pub struct Post {
    #[schema(example = 42)]
    pub id: RecordId,
    /// Owner's user id
    #[schema(example = 1)]
    #[sqlx(rename = "user_id")]
    pub user: RecordId,
    #[schema(example = "Hello")]
    pub title: String,
    #[schema(example = "First post")]
    pub body: String,
    /// Number of upvote rows referencing this post
    #[schema(example = 0)]
    pub upvote_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Post fields supplied at creation time
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user: RecordId,
    pub title: String,
    pub body: String,
}

/// Partial update of an existing post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    /// Apply onto a post in place
    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(body) = &self.body {
            post.body = body.clone();
        }
    }
}

// ============================================================================
// Upvote / Comment
// ============================================================================

/// One user's endorsement of a post. Unique per (user, post).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upvote {
    pub id: RecordId,
    pub user: RecordId,
    pub post: RecordId,
    pub created_at: DateTime<Utc>,
}

/// Result of an upvote toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvoteAction {
    Added,
    Removed,
}

/// A user-authored reply attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, sqlx::FromRow)]
pub struct Comment {
    #[schema(example = 7)]
    pub id: RecordId,
    #[schema(example = 3)]
    #[sqlx(rename = "user_id")]
    pub user: RecordId,
    #[schema(example = 42)]
    #[sqlx(rename = "post_id")]
    pub post: RecordId,
    #[schema(example = "hi")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Comment fields supplied at creation time
#[derive(Debug, Clone)]
pub struct NewComment {
    pub user: RecordId,
    pub post: RecordId,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 1,
            user: 9,
            title: "T".to_string(),
            body: "B".to_string(),
            upvote_count: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_post_changes_partial_apply() {
        let mut post = sample_post();
        let changes = PostChanges {
            title: Some("New".to_string()),
            body: None,
        };
        changes.apply(&mut post);

        assert_eq!(post.title, "New");
        assert_eq!(post.body, "B");
        assert_eq!(post.upvote_count, 3);
    }

    #[test]
    fn test_post_changes_empty() {
        assert!(PostChanges::default().is_empty());
    }

    #[test]
    fn test_post_serializes_owner_as_user() {
        let json = serde_json::to_value(sample_post()).unwrap();
        assert_eq!(json["user"], 9);
        assert_eq!(json["upvote_count"], 3);
    }
}
