//! Quillboard - a small blogging backend
//!
//! Users create posts, upvote posts and comment on posts, all behind JWT
//! authentication.
//!
//! # Modules
//!
//! - [`blog`] - Post / Upvote / Comment services and their stores
//! - [`user_auth`] - Registration, login, token refresh, bearer middleware
//! - [`gateway`] - axum router, handlers, response envelope, OpenAPI
//! - [`db`] - PostgreSQL pool and schema migration
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod blog;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod user_auth;

// Convenient re-exports at crate root
pub use blog::{BlogError, MemoryStore, PgStore, Post, RecordId};
pub use config::AppConfig;
pub use gateway::{build_router, state::AppState};
pub use user_auth::{AuthUser, UserAuthService};
