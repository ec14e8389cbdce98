/**
 * Blog Posts
 *
 * The post model and the operations behind the `/posts` endpoints.
 * Mutations follow the same order every time:
 *
 * 1. Validate the input
 * 2. Resolve the post (`NotFound` if absent)
 * 3. Check ownership (`NotAuthorized` if the caller is not the author)
 * 4. Write through the store
 *
 * The author is always taken from the authenticated identity, never from
 * the request body.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::guard::{assert_owner, OwnedResource};
use crate::backend::auth::users::User;
use crate::backend::blog::handlers::types::PostRequest;
use crate::backend::error::BackendError;
use crate::backend::store::ResourceStore;

/// Longest accepted title, in characters
pub const MAX_TITLE_LEN: usize = 200;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Owner; set once on creation
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for Post {
    fn owner_username(&self) -> &str {
        &self.author_username
    }
}

/// Post fields supplied on creation
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_username: String,
}

/// Editable post fields
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

/// Check a post body and map it onto the editable fields
pub fn validate_post(request: &PostRequest) -> Result<PostChanges, BackendError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(BackendError::validation("title", "Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(BackendError::validation(
            "title",
            format!("Title must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    if request.content.trim().is_empty() {
        return Err(BackendError::validation("content", "Content cannot be empty"));
    }

    Ok(PostChanges {
        title: title.to_string(),
        content: request.content.clone(),
    })
}

/// All posts, optionally by one author
pub async fn list_posts(store: &dyn ResourceStore, author: Option<&str>) -> Result<Vec<Post>, BackendError> {
    Ok(store.list_posts(author).await?)
}

/// A single post
pub async fn get_post(store: &dyn ResourceStore, id: i64) -> Result<Post, BackendError> {
    store.find_post(id).await?.ok_or_else(|| BackendError::not_found("post"))
}

/// Create a post owned by `author`
pub async fn create_post(
    store: &dyn ResourceStore,
    author: &User,
    request: &PostRequest,
) -> Result<Post, BackendError> {
    let fields = validate_post(request)?;

    let post = store
        .create_post(NewPost {
            title: fields.title,
            content: fields.content,
            author_username: author.username.clone(),
        })
        .await?;

    tracing::info!("Post {} created by {}", post.id, post.author_username);
    Ok(post)
}

/// Replace the title and content of a post the actor owns
pub async fn edit_post(
    store: &dyn ResourceStore,
    actor: &User,
    id: i64,
    request: &PostRequest,
) -> Result<Post, BackendError> {
    let changes = validate_post(request)?;
    let post = get_post(store, id).await?;
    assert_owner(actor, &post)?;

    let updated = store.update_post(id, changes).await?;
    tracing::info!("Post {} edited by {}", id, actor.username);
    Ok(updated)
}

/// Delete a post the actor owns, along with its comments
pub async fn delete_post(store: &dyn ResourceStore, actor: &User, id: i64) -> Result<(), BackendError> {
    let post = get_post(store, id).await?;
    assert_owner(actor, &post)?;

    store.delete_post(id).await?;
    tracing::info!("Post {} deleted by {}", id, actor.username);
    Ok(())
}
