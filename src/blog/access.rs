//! Shared lookup and ownership helpers

use super::error::{BlogError, PostAction};
use super::models::{Post, RecordId};
use super::repository::BlogStore;

/// Fetch a post or fail with [`BlogError::PostNotFound`]
pub async fn require_post(store: &dyn BlogStore, id: RecordId) -> Result<Post, BlogError> {
    store.get_post(id).await?.ok_or(BlogError::PostNotFound)
}

/// Fail with [`BlogError::NotOwner`] unless `caller` owns `post`
pub fn ensure_owner(post: &Post, caller: RecordId, action: PostAction) -> Result<(), BlogError> {
    if post.user == caller {
        return Ok(());
    }
    tracing::warn!(
        post_id = post.id,
        owner = post.user,
        caller,
        "Rejected attempt to {} a post owned by another user",
        action.verb()
    );
    Err(BlogError::NotOwner(action))
}
