//! Post service
//!
//! CRUD over posts. Mutations are restricted to the post's owner. For update
//! and delete the checks run as: post exists, caller owns it, payload valid.
//! A non-owner therefore never sees field-level validation detail.

use std::sync::Arc;

use super::access::{ensure_owner, require_post};
use super::error::{BlogError, PostAction};
use super::models::{NewPost, Post, PostChanges, RecordId};
use super::repository::{BlogStore, StoreError, UserStore};
use super::validation::{CreatePostRequest, JsonPayload, UpdatePostRequest};

pub struct PostService {
    store: Arc<dyn BlogStore>,
    users: Arc<dyn UserStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn BlogStore>, users: Arc<dyn UserStore>) -> Self {
        Self { store, users }
    }

    /// All posts, insertion order
    pub async fn list(&self) -> Result<Vec<Post>, BlogError> {
        Ok(self.store.list_posts().await?)
    }

    /// Create a post owned by `caller`
    pub async fn create(&self, caller: RecordId, payload: JsonPayload) -> Result<Post, BlogError> {
        // Both fields are `required`, so they are present past this point
        let req: CreatePostRequest = payload.decode()?;

        let post = self
            .store
            .insert_post(NewPost {
                user: caller,
                title: req.title.unwrap_or_default(),
                body: req.body.unwrap_or_default(),
            })
            .await
            .map_err(|e| match e {
                StoreError::MissingReference(_) => BlogError::UserNotFound,
                other => BlogError::Store(other),
            })?;

        tracing::info!(post_id = post.id, user_id = caller, "Post created");
        Ok(post)
    }

    pub async fn get(&self, id: RecordId) -> Result<Post, BlogError> {
        require_post(self.store.as_ref(), id).await
    }

    /// Partially update title/body. `upvote_count` is never touched here.
    pub async fn update(
        &self,
        id: RecordId,
        caller: RecordId,
        payload: JsonPayload,
    ) -> Result<Post, BlogError> {
        let post = require_post(self.store.as_ref(), id).await?;
        ensure_owner(&post, caller, PostAction::Edit)?;
        let req: UpdatePostRequest = payload.decode()?;

        let changes = PostChanges {
            title: req.title,
            body: req.body,
        };
        if changes.is_empty() {
            return Ok(post);
        }

        let updated = self
            .store
            .update_post(id, &changes)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        tracing::info!(post_id = id, user_id = caller, "Post updated");
        Ok(updated)
    }

    /// Delete a post along with its upvotes and comments
    pub async fn delete(&self, id: RecordId, caller: RecordId) -> Result<(), BlogError> {
        let post = require_post(self.store.as_ref(), id).await?;
        ensure_owner(&post, caller, PostAction::Delete)?;

        if !self.store.delete_post(id).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = id, user_id = caller, "Post deleted");
        Ok(())
    }

    /// Posts owned by the user called `username`
    pub async fn list_by_username(&self, username: &str) -> Result<Vec<Post>, BlogError> {
        let user = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or(BlogError::UserNotFound)?;
        Ok(self.store.list_posts_by_user(user.id).await?)
    }
}
