use std::sync::Arc;

use crate::blog::comments::CommentService;
use crate::blog::posts::PostService;
use crate::blog::repository::{BlogStore, UserStore};
use crate::blog::upvotes::UpvoteService;
use crate::config::AuthConfig;
use crate::db::Database;
use crate::user_auth::UserAuthService;

/// Gateway application state (shared, immutable)
pub struct AppState {
    pub posts: PostService,
    pub upvotes: UpvoteService,
    pub comments: CommentService,
    pub user_auth: UserAuthService,
    /// PostgreSQL pool, when running against a database (health checks)
    pub pg_db: Option<Arc<Database>>,
}

impl AppState {
    /// Wire every service onto one store
    pub fn new<S>(store: Arc<S>, auth: AuthConfig, pg_db: Option<Arc<Database>>) -> Self
    where
        S: BlogStore + UserStore + 'static,
    {
        let blog: Arc<dyn BlogStore> = store.clone();
        let users: Arc<dyn UserStore> = store;
        Self {
            posts: PostService::new(blog.clone(), users.clone()),
            upvotes: UpvoteService::new(blog.clone()),
            comments: CommentService::new(blog),
            user_auth: UserAuthService::new(users, auth),
            pg_db,
        }
    }
}
