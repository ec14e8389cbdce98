//! Blog Handlers Module
//!
//! HTTP handlers for posts and comments.
//!
//! - **`list_posts`** - GET /posts
//! - **`get_post`** - GET /posts/{id}
//! - **`create_post`** - POST /posts
//! - **`update_post`** - PUT /posts/{id}
//! - **`delete_post`** - DELETE /posts/{id}
//! - **`list_comments`** - GET /posts/{id}/comments
//! - **`create_comment`** - POST /posts/{id}/comments
//! - **`update_comment`** - PUT /comments/{id}
//! - **`delete_comment`** - DELETE /comments/{id}

pub mod types;
pub mod posts;
pub mod comments;

pub use comments::{create_comment, delete_comment, list_comments, update_comment};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};
pub use types::{CommentRequest, PostQuery, PostRequest};
