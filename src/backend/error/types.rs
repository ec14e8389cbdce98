/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the blog backend. Every failure
 * a handler can produce maps to exactly one variant, and every variant maps
 * to exactly one HTTP status.
 *
 * # Error Categories
 *
 * - `Validation` - Malformed client input, reported with the offending field
 * - `Unauthenticated` - Bad credentials or an invalid/expired token
 * - `NotAuthorized` - Authenticated, but not the owner of the resource
 * - `NotFound` - The addressed resource does not exist
 * - `Conflict` - Username or email already registered
 * - `Internal` - Store, hashing or signing failure
 *
 * Authentication and authorization messages are deliberately fixed strings:
 * they never say whether a username exists or who owns a resource.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Message returned for failed logins, whatever the underlying cause
pub const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Message returned for unusable bearer tokens, whatever the underlying cause
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// Message returned when a caller mutates a resource they do not own
pub const NOT_OWNER: &str = "Not the owner of this resource";

/// Backend error taxonomy
///
/// # Usage
///
/// ```rust
/// use blogd::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("post");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed input
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Credentials could not be verified
    ///
    /// Covers unknown usernames, wrong passwords, missing, malformed,
    /// forged or expired tokens, and tokens whose subject no longer exists.
    #[error("{message}")]
    Unauthenticated {
        /// Fixed, non-distinguishing message
        message: &'static str,
    },

    /// The caller is authenticated but does not own the resource
    #[error("{}", NOT_OWNER)]
    NotAuthorized,

    /// The addressed resource does not exist
    #[error("{resource} not found")]
    NotFound {
        /// Kind of resource, e.g. `post`
        resource: &'static str,
    },

    /// A unique field is already taken
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected failure in a collaborator (store, hasher, signer)
    ///
    /// The message is logged but never sent to the client.
    #[error("Internal error: {message}")]
    Internal {
        /// Detail for the server log
        message: String,
    },
}

impl BackendError {
    /// Failed login
    pub fn bad_credentials() -> Self {
        Self::Unauthenticated { message: BAD_CREDENTIALS }
    }

    /// Unusable bearer token
    pub fn invalid_credentials() -> Self {
        Self::Unauthenticated { message: INVALID_CREDENTIALS }
    }

    /// Missing resource
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Duplicate unique value
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Shorthand for a field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `NotAuthorized` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 400 Bad Request
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::Validation(err) => err.message().to_string(),
            Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
