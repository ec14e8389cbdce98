/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` logs every request and response through `tracing`
 * - `CorsLayer` admits the configured origins only
 */

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::routes::api_routes::{configure_auth_routes, configure_blog_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by the handlers
/// * `cors_origins` - Origins allowed to call the API from a browser
///
/// # Route Details
///
/// See [`api_routes`](crate::backend::routes::api_routes) for the API
/// surface. `GET /health` answers `{"status":"ok"}` and anything else falls
/// through to a JSON 404.
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_auth_routes(router);
    let router = configure_blog_routes(router);

    router
        .fallback(not_found)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Build the CORS layer for the given origins
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "status": 404 })),
    )
}
