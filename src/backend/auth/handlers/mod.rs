//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Handler exports
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! └── me.rs        - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /register - User registration
//! - **`login`** - POST /login - Exchange a credential for a session token
//! - **`get_me`** - GET /me - Identity behind the bearer token

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{RegisterRequest, LoginRequest, TokenResponse, UserResponse};

// Re-export handlers
pub use register::register;
pub use login::login;
pub use me::get_me;
