/**
 * PostgreSQL Resource Store
 *
 * `ResourceStore` implementation on top of `sqlx::PgPool`. The schema lives
 * in `migrations/` and is applied by [`PgStore::migrate`].
 *
 * Unique and foreign-key violations reported by PostgreSQL are translated
 * into `StoreError::Conflict` and `StoreError::Missing` respectively; every
 * other driver error is passed through as `StoreError::Database`.
 */

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::backend::auth::users::{NewUser, User};
use crate::backend::blog::comments::{Comment, CommentChanges, NewComment};
use crate::backend::blog::posts::{NewPost, Post, PostChanges};
use crate::backend::store::{ResourceStore, StoreError};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";
const POST_COLUMNS: &str = "id, title, content, author_username, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, post_id, content, commentator_username, created_at, updated_at";

/// Store backed by a PostgreSQL connection pool
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    /// Borrow the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate constraint violations into store errors
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(conflict_message(db_err.constraint()).to_string());
        }
        if db_err.is_foreign_key_violation() {
            if let Some(resource) = missing_resource(db_err.constraint()) {
                return StoreError::Missing(resource);
            }
        }
    }
    StoreError::Database(err)
}

fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("email") => "Email already registered",
        _ => "Username already registered",
    }
}

/// Which referenced row a failed foreign key points at
fn missing_resource(constraint: Option<&str>) -> Option<&'static str> {
    match constraint? {
        name if name.contains("post_id") => Some("post"),
        name if name.contains("username") => Some("user"),
        _ => None,
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn list_posts(&self, author: Option<&str>) -> Result<Vec<Post>, StoreError> {
        let posts = match author {
            Some(author) => {
                sqlx::query_as::<_, Post>(&format!(
                    "SELECT {POST_COLUMNS} FROM posts WHERE author_username = $1 ORDER BY id"
                ))
                .bind(author)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(posts)
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, content, author_username) VALUES ($1, $2, $3) RETURNING {POST_COLUMNS}"
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author_username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET title = $1, content = $2, updated_at = NOW() WHERE id = $3 RETURNING {POST_COLUMNS}"
        ))
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::Missing("post"))
    }

    async fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        // comments go with the post through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing("post"));
        }
        Ok(())
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY id"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        // the post or the commentator may vanish between the handler's check and this insert
        sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (post_id, content, commentator_username) VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(&comment.commentator_username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update_comment(&self, id: i64, changes: CommentChanges) -> Result<Comment, StoreError> {
        sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET content = $1, updated_at = NOW() WHERE id = $2 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(&changes.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::Missing("comment"))
    }

    async fn delete_comment(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing("comment"));
        }
        Ok(())
    }
}
