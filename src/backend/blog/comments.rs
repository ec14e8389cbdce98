/**
 * Comments
 *
 * The comment model and its operations. Comments hang off a post; reading
 * or creating them on a missing post is `NotFound`. Edits and deletes are
 * limited to the commentator.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::guard::{assert_owner, OwnedResource};
use crate::backend::auth::users::User;
use crate::backend::blog::handlers::types::CommentRequest;
use crate::backend::blog::posts::get_post;
use crate::backend::error::BackendError;
use crate::backend::store::ResourceStore;

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    /// Owner; set once on creation
    pub commentator_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for Comment {
    fn owner_username(&self) -> &str {
        &self.commentator_username
    }
}

/// Comment fields supplied on creation
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub content: String,
    pub commentator_username: String,
}

/// Editable comment fields
#[derive(Debug, Clone)]
pub struct CommentChanges {
    pub content: String,
}

/// Check a comment body and map it onto the editable fields
pub fn validate_comment(request: &CommentRequest) -> Result<CommentChanges, BackendError> {
    if request.content.trim().is_empty() {
        return Err(BackendError::validation("content", "Comment cannot be empty"));
    }
    Ok(CommentChanges {
        content: request.content.clone(),
    })
}

/// Comments on an existing post
pub async fn list_comments(store: &dyn ResourceStore, post_id: i64) -> Result<Vec<Comment>, BackendError> {
    get_post(store, post_id).await?;
    Ok(store.list_comments(post_id).await?)
}

async fn get_comment(store: &dyn ResourceStore, id: i64) -> Result<Comment, BackendError> {
    store.find_comment(id).await?.ok_or_else(|| BackendError::not_found("comment"))
}

/// Comment on a post as `commentator`
pub async fn create_comment(
    store: &dyn ResourceStore,
    commentator: &User,
    post_id: i64,
    request: &CommentRequest,
) -> Result<Comment, BackendError> {
    let fields = validate_comment(request)?;
    get_post(store, post_id).await?;

    let comment = store
        .create_comment(NewComment {
            post_id,
            content: fields.content,
            commentator_username: commentator.username.clone(),
        })
        .await?;

    tracing::info!("Comment {} on post {} by {}", comment.id, post_id, commentator.username);
    Ok(comment)
}

/// Replace the content of a comment the actor wrote
pub async fn edit_comment(
    store: &dyn ResourceStore,
    actor: &User,
    id: i64,
    request: &CommentRequest,
) -> Result<Comment, BackendError> {
    let changes = validate_comment(request)?;
    let comment = get_comment(store, id).await?;
    assert_owner(actor, &comment)?;

    let updated = store.update_comment(id, changes).await?;
    tracing::info!("Comment {} edited by {}", id, actor.username);
    Ok(updated)
}

/// Delete a comment the actor wrote
pub async fn delete_comment(store: &dyn ResourceStore, actor: &User, id: i64) -> Result<(), BackendError> {
    let comment = get_comment(store, id).await?;
    assert_owner(actor, &comment)?;

    store.delete_comment(id).await?;
    tracing::info!("Comment {} deleted by {}", id, actor.username);
    Ok(())
}
