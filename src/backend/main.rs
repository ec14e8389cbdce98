/**
 * Blog Server Entry Point
 *
 * Loads configuration, initializes tracing and serves the Axum app.
 */

use blogd::backend::server::init::create_app;
use blogd::shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Loaded configuration: {:?}", config);

    let app = match create_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Server initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
