//! Repository interfaces for blog persistence
//!
//! - [`UserStore`]: user lookup and registration
//! - [`BlogStore`]: posts, upvotes and comments
//!
//! Implemented by [`super::memory::MemoryStore`] and
//! [`super::postgres::PgStore`]. Services only see `Arc<dyn ...>`.

use async_trait::async_trait;
use thiserror::Error;

use super::models::{
    Comment, NewComment, NewPost, NewUser, Post, PostChanges, RecordId, UpvoteAction, User,
};

/// Persistence failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint rejected the write
    #[error("Duplicate {0}")]
    Duplicate(&'static str),

    /// A foreign key pointed at a row that no longer exists
    #[error("Referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User lookup and registration
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: RecordId) -> StoreResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Insert a user. Fails with [`StoreError::Duplicate`] on a taken username.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
}

/// Post, upvote and comment persistence
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All posts in insertion order
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    async fn get_post(&self, id: RecordId) -> StoreResult<Option<Post>>;

    /// Posts owned by `user`, in insertion order
    async fn list_posts_by_user(&self, user: RecordId) -> StoreResult<Vec<Post>>;

    /// Insert a post with `upvote_count = 0`
    async fn insert_post(&self, post: NewPost) -> StoreResult<Post>;

    /// Apply title/body changes. `None` if the post is gone.
    async fn update_post(&self, id: RecordId, changes: &PostChanges) -> StoreResult<Option<Post>>;

    /// Delete a post together with its upvotes and comments.
    /// Returns `false` if nothing was deleted.
    async fn delete_post(&self, id: RecordId) -> StoreResult<bool>;

    /// Add or remove `user`'s upvote on `post` and adjust `upvote_count`
    /// as one atomic unit. `None` if the post does not exist.
    async fn toggle_upvote(
        &self,
        post: RecordId,
        user: RecordId,
    ) -> StoreResult<Option<(Post, UpvoteAction)>>;

    /// Comments on `post` in creation order
    async fn list_comments(&self, post: RecordId) -> StoreResult<Vec<Comment>>;

    /// Insert a comment. Fails with [`StoreError::MissingReference`] if the
    /// post vanished concurrently.
    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment>;
}
