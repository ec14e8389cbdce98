//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, CORS and tracing layers
//! └── api_routes.rs   - Auth and blog endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use blogd::backend::routes::create_router;
//! use blogd::backend::server::state::AppState;
//!
//! let state = AppState::in_memory(b"dev-secret".to_vec(), 12).unwrap();
//! let router = create_router(state, &["http://localhost:3000".to_string()]);
//! ```

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
