//! Upvote service
//!
//! A toggle: the first call by a user adds an upvote, the next removes it.
//! The store performs the check-and-write atomically, so `upvote_count`
//! always equals the number of upvote rows.

use std::sync::Arc;

use super::error::BlogError;
use super::models::{Post, RecordId};
use super::repository::BlogStore;

pub struct UpvoteService {
    store: Arc<dyn BlogStore>,
}

impl UpvoteService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    /// Toggle `caller`'s upvote on post `id` and return the updated post
    pub async fn toggle(&self, id: RecordId, caller: RecordId) -> Result<Post, BlogError> {
        let (post, action) = self
            .store
            .toggle_upvote(id, caller)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        tracing::info!(
            post_id = id,
            user_id = caller,
            ?action,
            upvote_count = post.upvote_count,
            "Upvote toggled"
        );
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::memory::MemoryStore;
    use crate::blog::models::{NewPost, NewUser};
    use crate::blog::repository::UserStore;

    async fn setup() -> (UpvoteService, Arc<MemoryStore>, Post) {
        let store = Arc::new(MemoryStore::new());
        let owner = store
            .insert_user(NewUser {
                username: "owner".to_string(),
                email: None,
                password_hash: "x".to_string(),
            })
            .await
            .unwrap();
        let post = store
            .insert_post(NewPost {
                user: owner.id,
                title: "T".to_string(),
                body: "B".to_string(),
            })
            .await
            .unwrap();
        (UpvoteService::new(store.clone()), store, post)
    }

    #[tokio::test]
    async fn test_toggle_missing_post() {
        let (service, _, _) = setup().await;
        assert!(matches!(
            service.toggle(12345, 1).await.unwrap_err(),
            BlogError::PostNotFound
        ));
    }

    #[tokio::test]
    async fn test_even_toggles_restore_count() {
        let (service, store, post) = setup().await;
        for round in 1..=6 {
            let p = service.toggle(post.id, 77).await.unwrap();
            let expected = if round % 2 == 1 { 1 } else { 0 };
            assert_eq!(p.upvote_count, expected, "after {} toggles", round);
            assert_eq!(store.upvote_rows(post.id), expected);
        }
    }

    #[tokio::test]
    async fn test_interleaved_users() {
        let (service, store, post) = setup().await;

        service.toggle(post.id, 1).await.unwrap();
        service.toggle(post.id, 2).await.unwrap();
        service.toggle(post.id, 1).await.unwrap();
        service.toggle(post.id, 3).await.unwrap();
        let p = service.toggle(post.id, 1).await.unwrap();

        // user 1: 3 toggles (+1), user 2: 1 (+1), user 3: 1 (+1)
        assert_eq!(p.upvote_count, 3);
        assert_eq!(store.upvote_rows(post.id), 3);
    }

    #[tokio::test]
    async fn test_concurrent_toggles() {
        let (service, store, post) = setup().await;
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for user in 1..=16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..(user % 3 + 1) {
                    service.toggle(post.id, user).await.unwrap();
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        // Users with an odd number of toggles keep an upvote
        let expected = (1..=16).filter(|u| (u % 3 + 1) % 2 == 1).count() as i64;
        let post = store.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(post.upvote_count, expected);
        assert_eq!(store.upvote_rows(post.id), expected);
    }
}
