/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is cloned into every request and holds:
 * - The resource store (PostgreSQL or in-memory)
 * - The token service
 * - The password hasher
 * - The authenticator built from the three above
 *
 * Everything is behind an `Arc` and immutable after startup; the store
 * handles its own concurrency.
 *
 * # Example
 *
 * ```rust
 * use blogd::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let posts = state.store.list_posts(None).await;
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use bcrypt::BcryptError;

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::{TokenConfig, TokenService};
use crate::backend::store::{MemoryStore, SharedStore};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Users, posts and comments
    pub store: SharedStore,

    /// Issues and validates session tokens
    pub tokens: Arc<TokenService>,

    /// bcrypt hasher at the configured cost
    pub hasher: Arc<PasswordHasher>,

    /// Resolves credentials and tokens to identities
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// Wire the components together
    pub fn new(store: SharedStore, token_config: TokenConfig, hasher: PasswordHasher) -> Self {
        let tokens = Arc::new(TokenService::new(token_config));
        let hasher = Arc::new(hasher);
        let authenticator = Arc::new(Authenticator::new(store.clone(), tokens.clone(), hasher.clone()));

        Self {
            store,
            tokens,
            hasher,
            authenticator,
        }
    }

    /// State over a fresh in-memory store with default token settings
    ///
    /// # Errors
    ///
    /// Returns an error if `bcrypt_cost` is outside bcrypt's accepted range.
    pub fn in_memory(secret: Vec<u8>, bcrypt_cost: u32) -> Result<Self, BcryptError> {
        Ok(Self::new(
            Arc::new(MemoryStore::new()),
            TokenConfig::new(secret),
            PasswordHasher::new(bcrypt_cost)?,
        ))
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<Authenticator> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.authenticator.clone()
    }
}
