//! Authentication Module
//!
//! This module is the authentication and authorization core: password
//! hashing, session tokens, credential resolution and the ownership guard,
//! plus the HTTP handlers for the auth endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs            - Module exports and documentation
//! ├── password.rs       - bcrypt hashing and verification
//! ├── sessions.rs       - Token issuance and validation (JWT)
//! ├── authenticator.rs  - Credential → identity resolution
//! ├── guard.rs          - Ownership check for mutations
//! ├── users.rs          - Identity model and registration
//! └── handlers/         - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → identity created
//! 2. **Login**: username, password → credential verified → token returned
//! 3. **Authenticated request**: bearer token → identity resolved once by
//!    the `AuthUser` extractor → passed explicitly to the operation
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless, signed with a single configured HMAC secret,
//!   and expire after 90 minutes by default
//! - Authentication failures never reveal which check failed

/// Password hashing
pub mod password;

/// Session token issuance and validation
pub mod sessions;

/// Credential resolution
pub mod authenticator;

/// Ownership-based authorization
pub mod guard;

/// Identity model and registration
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use authenticator::Authenticator;
pub use guard::{assert_owner, OwnedResource};
pub use password::PasswordHasher;
pub use sessions::{Claims, TokenConfig, TokenError, TokenService};
pub use users::User;
pub use handlers::{register, login, get_me};
