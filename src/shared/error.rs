//! Shared Error Types
//!
//! This module defines error types that are not tied to the HTTP layer.
//! They describe malformed client input and are wrapped by
//! `backend::error::BackendError` at the boundary.
//!
//! # Usage
//!
//! ```rust
//! use blogd::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title cannot be empty");
//! assert_eq!(error.field(), "title");
//! ```
use thiserror::Error;

/// Errors describing bad input, independent of transport
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }

    /// Client-facing description, without the field prefix
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}
