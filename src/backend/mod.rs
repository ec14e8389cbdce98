//! Backend Module
//!
//! All server-side code for the blog service: an Axum HTTP server over a
//! pluggable resource store, with bcrypt password hashing, signed session
//! tokens and owner-only mutations.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, store selection
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Passwords, tokens, authenticator, ownership guard, users
//! - **`blog`** - Posts and comments
//! - **`store`** - `ResourceStore` trait with PostgreSQL and in-memory backends
//! - **`middleware`** - Bearer-token identity extractor
//! - **`error`** - Backend error type and HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and authorization
//! ├── blog/           - Posts and comments
//! ├── store/          - Persistence
//! ├── middleware/     - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Lifecycle
//!
//! 1. `TraceLayer` and `CorsLayer` run first
//! 2. Handlers that need an identity take `AuthUser`, which validates the
//!    bearer token and loads the user once
//! 3. The blog operation resolves the target, checks ownership and writes
//!    through the store
//! 4. Any `BackendError` becomes a JSON error response
//!
//! # Error Handling
//!
//! Component errors (`StoreError`, `TokenError`, `SharedError`) convert into
//! `BackendError` with `?`; its `IntoResponse` impl chooses the status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and authorization
pub mod auth;

/// Posts and comments
pub mod blog;

/// Resource persistence
pub mod store;

/// Middleware for request processing
pub mod middleware;
