/**
 * Authentication Handler Types
 *
 * Request and response types for the register, login and me handlers.
 * Request types never print the password in their `Debug` output.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Registration request
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login request: the credential
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// User's username
    pub username: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returned by a successful login
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// Signed session token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    /// User's unique ID
    pub id: i64,
    /// User's username
    pub username: String,
    /// User's email address
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
