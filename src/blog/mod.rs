//! Blog core
//!
//! - [`models`]: User, Post, Upvote, Comment records
//! - [`repository`]: store traits and [`StoreError`]
//! - [`memory`] / [`postgres`]: store implementations
//! - [`posts`], [`upvotes`], [`comments`]: the services
//! - [`validation`]: request payloads and field errors
//!
//! Every service call takes the caller's user id explicitly.

pub mod access;
pub mod comments;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod posts;
pub mod repository;
pub mod upvotes;
pub mod validation;

pub use error::{BlogError, PostAction};
pub use memory::MemoryStore;
pub use models::{Comment, Post, RecordId, Upvote, UpvoteAction, User};
pub use postgres::PgStore;
pub use repository::{BlogStore, StoreError, UserStore};
