//! Blog Module
//!
//! Posts and comments. Every mutation takes the caller's identity as an
//! explicit argument and checks ownership through
//! [`assert_owner`](crate::backend::auth::guard::assert_owner) after the
//! target has been resolved.

/// Post model and operations
pub mod posts;

/// Comment model and operations
pub mod comments;

/// HTTP handlers for post and comment endpoints
pub mod handlers;

pub use comments::Comment;
pub use posts::Post;
