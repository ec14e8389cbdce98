/**
 * Authenticator
 *
 * Resolves a presented credential to an identity record. Two entry points:
 *
 * - **Password**: used by `POST /login`
 * - **Token**: used for every other authenticated request
 *
 * Failure reporting is uniform. An unknown username and a wrong
 * password produce the same `Unauthenticated` error, and an unknown
 * username still pays for a bcrypt verification. A bad token and a token
 * whose subject no longer exists are likewise indistinguishable.
 */

use std::sync::Arc;

use crate::backend::auth::handlers::types::LoginRequest;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;

/// Resolves credentials to identities
#[derive(Clone)]
pub struct Authenticator {
    store: SharedStore,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
}

impl Authenticator {
    pub fn new(store: SharedStore, tokens: Arc<TokenService>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, tokens, hasher }
    }

    /// Verify a username/password pair
    pub async fn authenticate_by_password(&self, credential: &LoginRequest) -> Result<User, BackendError> {
        let user = self.store.find_user_by_username(&credential.username).await?;

        let Some(user) = user else {
            self.hasher.verify_dummy(&credential.password);
            tracing::warn!("Login rejected for {}", credential.username);
            return Err(BackendError::bad_credentials());
        };

        if !self.hasher.verify(&credential.password, &user.password_hash) {
            tracing::warn!("Login rejected for {}", credential.username);
            return Err(BackendError::bad_credentials());
        }

        Ok(user)
    }

    /// Verify a bearer token and load the identity it names
    pub async fn authenticate_by_token(&self, token: &str) -> Result<User, BackendError> {
        let subject = self.tokens.validate(token).map_err(|e| {
            tracing::warn!("Invalid token: {}", e);
            BackendError::invalid_credentials()
        })?;

        self.store.find_user_by_username(&subject).await?.ok_or_else(|| {
            tracing::warn!("Token subject no longer exists: {}", subject);
            BackendError::invalid_credentials()
        })
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("tokens", &self.tokens)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}
