//! blogd - Blog Backend Library
//!
//! A small blogging API: users register and log in, then create, edit and
//! delete their own posts and comments. Anyone may read.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration and validation errors that do not depend
//!   on the HTTP stack
//!
//! - **`backend`** - The Axum server
//!   - Password hashing (bcrypt) and session tokens (JWT)
//!   - Credential resolution and ownership checks
//!   - Post and comment operations
//!   - PostgreSQL and in-memory stores
//!
//! # Usage
//!
//! ```rust,no_run
//! use blogd::backend::server::init::create_app;
//! use blogd::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security Model
//!
//! - Passwords are stored only as bcrypt hashes
//! - Session tokens are HMAC-signed, carry the username as subject and
//!   expire (90 minutes by default)
//! - Every mutation checks that the caller owns the target, after the
//!   target has been found
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - Custom error types in `shared::error` and `backend::error`

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
