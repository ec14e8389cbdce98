/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Reject duplicate usernames and emails
 * 3. Hash password using bcrypt
 * 4. Create user in the store
 *
 * Registration does not log the user in; clients call POST /login next.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::users::register_user;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - If a field is malformed (body names the field), or
///   the username or email is already registered
/// * `500 Internal Server Error` - If password hashing or the store fails
///
/// # Example Request
///
/// ```http
/// POST /register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "id": 1,
///   "username": "alice",
///   "email": "alice@example.com"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    let Json(request) = payload?;
    tracing::info!("Register request for username: {}", request.username);

    let user = register_user(state.store.as_ref(), &state.hasher, &request).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
