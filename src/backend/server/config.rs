/**
 * Server Configuration
 *
 * Turns a validated [`AppConfig`] into the runtime components the server
 * needs, starting with the resource store.
 *
 * # Store Selection
 *
 * - `DATABASE_URL` set: connect to PostgreSQL and run migrations. Either
 *   step failing aborts startup; the server never runs against a schema it
 *   could not verify.
 * - `DATABASE_URL` unset: fall back to the in-memory store, with a warning
 *   that nothing will survive a restart.
 */

use std::sync::Arc;

use thiserror::Error;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenConfig;
use crate::backend::store::{MemoryStore, PgStore, SharedStore, StoreError};
use crate::shared::config::AppConfig;

/// Failures that prevent the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database connection failed: {0}")]
    Database(#[from] StoreError),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("password hasher setup failed: {0}")]
    Hasher(#[from] bcrypt::BcryptError),
}

/// Open the configured resource store
///
/// # Errors
///
/// Returns an error if a database URL is configured but the connection or
/// the migrations fail.
pub async fn load_store(config: &AppConfig) -> Result<SharedStore, StartupError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not persist.");
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("Connecting to database...");
    let store = PgStore::connect(database_url).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    store.migrate().await?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(store))
}

/// Token settings from configuration
pub fn token_config(config: &AppConfig) -> TokenConfig {
    TokenConfig::new(config.jwt_secret.as_bytes())
        .with_algorithm(config.jwt_algorithm)
        .with_ttl(config.token_ttl)
}

/// Password hasher at the configured cost
pub fn password_hasher(config: &AppConfig) -> Result<PasswordHasher, StartupError> {
    Ok(PasswordHasher::new(config.bcrypt_cost)?)
}
