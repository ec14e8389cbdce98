/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store loading, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the resource store (PostgreSQL or in-memory)
 * 2. Build the password hasher and token service from configuration
 * 3. Assemble `AppState`
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, password_hasher, token_config, StartupError};
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the configured database cannot be reached or migrated, or
/// when the bcrypt cost is rejected.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing blog backend server");

    let store = load_store(config).await?;
    let hasher = password_hasher(config)?;
    let app_state = AppState::new(store, token_config(config), hasher);

    tracing::info!(
        "Auth configured: {:?} tokens valid for {} minutes, bcrypt cost {}",
        config.jwt_algorithm,
        config.token_ttl.as_secs() / 60,
        config.bcrypt_cost
    );

    Ok(create_router(app_state, &config.cors_origins))
}
