/**
 * In-Memory Resource Store
 *
 * Keeps users, posts and comments in ordered maps behind a single
 * `tokio::sync::RwLock`. Reads share the lock; every mutation takes it
 * exclusively, so each trait call is atomic with respect to the others.
 *
 * The store enforces the same rules as the PostgreSQL schema: unique
 * usernames and emails, comments require an existing post, and deleting a
 * post removes its comments.
 */

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::backend::auth::users::{NewUser, User};
use crate::backend::blog::comments::{Comment, CommentChanges, NewComment};
use crate::backend::blog::posts::{NewPost, Post, PostChanges};
use crate::backend::store::{ResourceStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    user_seq: i64,
    post_seq: i64,
    comment_seq: i64,
}

/// Store that lives for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("Username already registered".to_string()));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }

        tables.user_seq += 1;
        let created = User {
            id: tables.user_seq,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_posts(&self, author: Option<&str>) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| author.map_or(true, |a| p.author_username == a))
            .cloned()
            .collect())
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.values().any(|u| u.username == post.author_username) {
            return Err(StoreError::Missing("user"));
        }

        tables.post_seq += 1;
        let now = Utc::now();
        let created = Post {
            id: tables.post_seq,
            title: post.title,
            content: post.content,
            author_username: post.author_username,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(StoreError::Missing("post"))?;

        post.title = changes.title;
        post.content = changes.content;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).ok_or(StoreError::Missing("post"))?;
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.posts.contains_key(&comment.post_id) {
            return Err(StoreError::Missing("post"));
        }
        if !tables.users.values().any(|u| u.username == comment.commentator_username) {
            return Err(StoreError::Missing("user"));
        }

        tables.comment_seq += 1;
        let now = Utc::now();
        let created = Comment {
            id: tables.comment_seq,
            post_id: comment.post_id,
            content: comment.content,
            commentator_username: comment.commentator_username,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_comment(&self, id: i64, changes: CommentChanges) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;
        let comment = tables.comments.get_mut(&id).ok_or(StoreError::Missing("comment"))?;

        comment.content = changes.content;
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.comments.remove(&id).ok_or(StoreError::Missing("comment"))?;
        Ok(())
    }
}
