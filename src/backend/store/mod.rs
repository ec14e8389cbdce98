//! Resource Store
//!
//! Persistence for users, posts and comments behind a narrow async trait.
//! The authentication core and the blog operations only ever talk to
//! [`ResourceStore`]; they never see a connection pool.
//!
//! # Implementations
//!
//! - **`postgres`** - `PgStore`, backed by `sqlx::PgPool` and the schema in
//!   `migrations/`
//! - **`memory`** - `MemoryStore`, tables held behind a `tokio::sync::RwLock`;
//!   used by the test suite and when no `DATABASE_URL` is configured
//!
//! # Contract
//!
//! - `create_*` assigns ids and timestamps; the caller supplies owner fields
//!   from an authenticated identity.
//! - `update_*` and `delete_*` assume the caller has already checked
//!   ownership. They report [`StoreError::Missing`] when the row vanished in
//!   between.
//! - Deleting a post deletes its comments.
//! - Duplicate usernames or emails are reported as [`StoreError::Conflict`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::auth::users::{NewUser, User};
use crate::backend::blog::comments::{Comment, CommentChanges, NewComment};
use crate::backend::blog::posts::{NewPost, Post, PostChanges};

/// PostgreSQL implementation
pub mod postgres;

/// In-memory implementation
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store handle shared across handlers
pub type SharedStore = Arc<dyn ResourceStore>;

/// Errors surfaced by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique column already holds the value
    #[error("{0}")]
    Conflict(String),

    /// The row addressed by an update/delete no longer exists
    #[error("{0} not found")]
    Missing(&'static str),

    /// Driver or query failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence contract consumed by the authentication core and the blog
/// operations
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Look up an identity by its unique username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Persist a new identity
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// All posts, oldest first, optionally restricted to one author
    async fn list_posts(&self, author: Option<&str>) -> Result<Vec<Post>, StoreError>;

    /// A single post
    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// Persist a new post
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Overwrite the editable fields of a post
    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Post, StoreError>;

    /// Delete a post and its comments
    async fn delete_post(&self, id: i64) -> Result<(), StoreError>;

    /// Comments on a post, oldest first
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, StoreError>;

    /// A single comment
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError>;

    /// Persist a new comment
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;

    /// Overwrite the editable fields of a comment
    async fn update_comment(&self, id: i64, changes: CommentChanges) -> Result<Comment, StoreError>;

    /// Delete a comment
    async fn delete_comment(&self, id: i64) -> Result<(), StoreError>;
}
