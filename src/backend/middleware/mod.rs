//! Middleware Module
//!
//! Request-processing pieces that run before handlers.
//!
//! - **`auth`** - Bearer-token extractor that resolves the caller's identity

pub mod auth;

pub use auth::{bearer_token, AuthUser};
