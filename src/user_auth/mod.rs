//! Identity provider
//!
//! Registration, username/password login issuing JWT access + refresh
//! tokens, token refresh, and the bearer middleware that turns a verified
//! access token into an explicit [`AuthUser`].

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use error::UserAuthError;
pub use service::{AuthUser, Claims, TokenType, UserAuthService};
