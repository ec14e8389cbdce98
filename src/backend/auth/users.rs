/**
 * User Model and Registration
 *
 * This module holds the identity record and the registration operation.
 * Registration validates the request field by field, hashes the password,
 * and hands a fully-formed `NewUser` to the store.
 */

use chrono::{DateTime, Utc};

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::error::BackendError;
use crate::backend::store::ResourceStore;

/// A registered identity
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Identity fields supplied on creation
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    // Rest can be alphanumeric or underscore
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Basic email shape check: something@something, at most 254 chars
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Register a new identity
///
/// # Errors
///
/// * `Validation` - username, email or password malformed (field named)
/// * `Conflict` - username or email already registered
/// * `Internal` - hashing or store failure
pub async fn register_user(
    store: &dyn ResourceStore,
    hasher: &PasswordHasher,
    request: &RegisterRequest,
) -> Result<User, BackendError> {
    if !is_valid_username(&request.username) {
        return Err(BackendError::validation(
            "username",
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !is_valid_email(&request.email) {
        return Err(BackendError::validation("email", "Invalid email format"));
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(BackendError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    if store.find_user_by_username(&request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::conflict("Username already registered"));
    }

    let password_hash = hasher
        .hash(&request.password)
        .map_err(|e| BackendError::internal(format!("failed to hash password: {}", e)))?;

    // the store re-checks uniqueness, which also covers the email column
    let user = store
        .create_user(NewUser {
            username: request.username.clone(),
            email: request.email.clone(),
            password_hash,
        })
        .await?;

    tracing::info!("User registered: {}", user.username);
    Ok(user)
}
