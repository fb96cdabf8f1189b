//! HTTP handlers
//!
//! - [`posts`]: post CRUD and per-user listing
//! - [`interactions`]: upvote toggle and comments
//! - [`health`]: liveness / storage check

pub mod health;
pub mod interactions;
pub mod posts;

pub use health::{HealthResponse, health_check};
pub use interactions::{create_comment, list_comments, toggle_upvote};
pub use posts::{create_post, delete_post, get_post, list_posts, list_user_posts, update_post};
