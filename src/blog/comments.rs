//! Comment service (append-only)

use std::sync::Arc;

use super::access::require_post;
use super::error::BlogError;
use super::models::{Comment, NewComment, RecordId};
use super::repository::{BlogStore, StoreError};
use super::validation::{CreateCommentRequest, JsonPayload};

pub struct CommentService {
    store: Arc<dyn BlogStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    /// Comments on post `id`, oldest first
    pub async fn list(&self, id: RecordId) -> Result<Vec<Comment>, BlogError> {
        require_post(self.store.as_ref(), id).await?;
        Ok(self.store.list_comments(id).await?)
    }

    /// Add a comment by `caller` to post `id`
    pub async fn create(
        &self,
        id: RecordId,
        caller: RecordId,
        payload: JsonPayload,
    ) -> Result<Comment, BlogError> {
        require_post(self.store.as_ref(), id).await?;
        let req: CreateCommentRequest = payload.decode()?;

        let comment = self
            .store
            .insert_comment(NewComment {
                user: caller,
                post: id,
                body: req.body.unwrap_or_default(),
            })
            .await
            .map_err(|e| match e {
                // Post deleted between the lookup and the insert
                StoreError::MissingReference(_) => BlogError::PostNotFound,
                other => BlogError::Store(other),
            })?;

        tracing::info!(
            comment_id = comment.id,
            post_id = id,
            user_id = caller,
            "Comment created"
        );
        Ok(comment)
    }
}
