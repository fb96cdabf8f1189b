//! In-memory store
//!
//! Backs the service when no PostgreSQL URL is configured, and all unit
//! tests. Every table sits behind one mutex, so each trait call (including
//! the upvote toggle) is a single atomic step.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::models::{
    Comment, NewComment, NewPost, NewUser, Post, PostChanges, RecordId, Upvote, UpvoteAction,
    User,
};
use super::repository::{BlogStore, StoreError, StoreResult, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<RecordId, User>,
    username_index: HashMap<String, RecordId>,
    posts: BTreeMap<RecordId, Post>,
    /// Keyed by (post, user): one upvote per pair
    upvotes: BTreeMap<(RecordId, RecordId), Upvote>,
    comments: BTreeMap<RecordId, Comment>,
    last_id: RecordId,
}

impl Tables {
    fn next_id(&mut self) -> RecordId {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    /// Upvote rows referencing `post`, for checking the counter against
    #[cfg(test)]
    pub(crate) fn upvote_rows(&self, post: RecordId) -> i64 {
        let t = self.tables.lock().unwrap();
        t.upvotes.keys().filter(|(p, _)| *p == post).count() as i64
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: RecordId) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let t = self.lock()?;
        Ok(t.username_index
            .get(username)
            .and_then(|id| t.users.get(id))
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut t = self.lock()?;
        if t.username_index.contains_key(&user.username) {
            return Err(StoreError::Duplicate("username"));
        }
        let id = t.next_id();
        let record = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        t.username_index.insert(record.username.clone(), id);
        t.users.insert(id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self.lock()?.posts.values().cloned().collect())
    }

    async fn get_post(&self, id: RecordId) -> StoreResult<Option<Post>> {
        Ok(self.lock()?.posts.get(&id).cloned())
    }

    async fn list_posts_by_user(&self, user: RecordId) -> StoreResult<Vec<Post>> {
        Ok(self
            .lock()?
            .posts
            .values()
            .filter(|p| p.user == user)
            .cloned()
            .collect())
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let mut t = self.lock()?;
        if !t.users.contains_key(&post.user) {
            return Err(StoreError::MissingReference("user"));
        }
        let id = t.next_id();
        let record = Post {
            id,
            user: post.user,
            title: post.title,
            body: post.body,
            upvote_count: 0,
            created_at: Utc::now(),
        };
        t.posts.insert(id, record.clone());
        Ok(record)
    }

    async fn update_post(&self, id: RecordId, changes: &PostChanges) -> StoreResult<Option<Post>> {
        let mut t = self.lock()?;
        Ok(t.posts.get_mut(&id).map(|post| {
            changes.apply(post);
            post.clone()
        }))
    }

    async fn delete_post(&self, id: RecordId) -> StoreResult<bool> {
        let mut t = self.lock()?;
        if t.posts.remove(&id).is_none() {
            return Ok(false);
        }
        t.upvotes.retain(|(post, _), _| *post != id);
        t.comments.retain(|_, c| c.post != id);
        Ok(true)
    }

    async fn toggle_upvote(
        &self,
        post: RecordId,
        user: RecordId,
    ) -> StoreResult<Option<(Post, UpvoteAction)>> {
        let mut t = self.lock()?;
        if !t.posts.contains_key(&post) {
            return Ok(None);
        }

        let action = if t.upvotes.remove(&(post, user)).is_some() {
            UpvoteAction::Removed
        } else {
            let id = t.next_id();
            t.upvotes.insert(
                (post, user),
                Upvote {
                    id,
                    user,
                    post,
                    created_at: Utc::now(),
                },
            );
            UpvoteAction::Added
        };

        let Some(record) = t.posts.get_mut(&post) else {
            return Ok(None);
        };
        match action {
            UpvoteAction::Added => record.upvote_count += 1,
            UpvoteAction::Removed => record.upvote_count -= 1,
        }
        Ok(Some((record.clone(), action)))
    }

    async fn list_comments(&self, post: RecordId) -> StoreResult<Vec<Comment>> {
        Ok(self
            .lock()?
            .comments
            .values()
            .filter(|c| c.post == post)
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut t = self.lock()?;
        if !t.posts.contains_key(&comment.post) {
            return Err(StoreError::MissingReference("post"));
        }
        let id = t.next_id();
        let record = Comment {
            id,
            user: comment.user,
            post: comment.post,
            body: comment.body,
            created_at: Utc::now(),
        };
        t.comments.insert(id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_user(name: &str) -> (MemoryStore, RecordId) {
        let store = MemoryStore::new();
        let user = store
            .insert_user(NewUser {
                username: name.to_string(),
                email: None,
                password_hash: "x".to_string(),
            })
            .await
            .unwrap();
        (store, user.id)
    }

    async fn new_post(store: &MemoryStore, user: RecordId) -> Post {
        store
            .insert_post(NewPost {
                user,
                title: "T".to_string(),
                body: "B".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let (store, _) = store_with_user("alice").await;
        let err = store
            .insert_user(NewUser {
                username: "alice".to_string(),
                email: None,
                password_hash: "y".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("username")));
    }

    #[tokio::test]
    async fn test_toggle_keeps_count_in_sync() {
        let (store, alice) = store_with_user("alice").await;
        let post = new_post(&store, alice).await;

        let (p, action) = store.toggle_upvote(post.id, 100).await.unwrap().unwrap();
        assert_eq!(action, UpvoteAction::Added);
        assert_eq!(p.upvote_count, 1);
        assert_eq!(store.upvote_rows(post.id), 1);

        let (p, action) = store.toggle_upvote(post.id, 100).await.unwrap().unwrap();
        assert_eq!(action, UpvoteAction::Removed);
        assert_eq!(p.upvote_count, 0);
        assert_eq!(store.upvote_rows(post.id), 0);
    }

    #[tokio::test]
    async fn test_toggle_missing_post() {
        let store = MemoryStore::new();
        assert!(store.toggle_upvote(5, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let (store, alice) = store_with_user("alice").await;
        let post = new_post(&store, alice).await;
        store.toggle_upvote(post.id, alice).await.unwrap();
        store
            .insert_comment(NewComment {
                user: alice,
                post: post.id,
                body: "hi".to_string(),
            })
            .await
            .unwrap();

        assert!(store.delete_post(post.id).await.unwrap());
        assert_eq!(store.upvote_rows(post.id), 0);
        assert!(store.list_comments(post.id).await.unwrap().is_empty());
        assert!(!store.delete_post(post.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let store = MemoryStore::new();
        let err = store
            .insert_comment(NewComment {
                user: 1,
                post: 99,
                body: "hi".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference("post")));
    }

    #[tokio::test]
    async fn test_posts_listed_in_insertion_order() {
        let (store, alice) = store_with_user("alice").await;
        let first = new_post(&store, alice).await;
        let second = new_post(&store, alice).await;
        let ids: Vec<_> = store.list_posts().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
