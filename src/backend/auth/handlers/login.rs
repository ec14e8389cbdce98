/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Issue a session token
 *
 * # Security
 *
 * - Unknown usernames and wrong passwords return the same 401
 * - Passwords and tokens are never logged
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If the body is not a valid login request
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store or token signing fails
///
/// # Example Request
///
/// ```http
/// POST /login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "secret123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "bearer",
///   "expires_in": 5400
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, BackendError> {
    let Json(request) = payload?;
    tracing::info!("Login request for: {}", request.username);

    let user = state.authenticator.authenticate_by_password(&request).await?;

    let access_token = state.tokens.issue(&user.username, None)?;

    tracing::info!("User logged in successfully: {}", user.username);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.tokens.default_ttl().as_secs(),
    }))
}
