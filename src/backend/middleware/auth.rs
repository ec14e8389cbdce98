/**
 * Authentication Extractor
 *
 * Resolves the caller's identity from the `Authorization: Bearer <token>`
 * header, once per request, at the HTTP boundary. Handlers that need an
 * identity take an [`AuthUser`] argument and pass the resolved `User`
 * explicitly into the blog operations.
 *
 * A missing header, a non-bearer scheme, an invalid or expired token, and a
 * token whose subject no longer exists are all rejected with the same 401.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Extract the bearer token from request headers
///
/// The scheme is matched case-insensitively; the token itself must be
/// non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Axum extractor for the authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            BackendError::invalid_credentials()
        })?;

        let user = state.authenticator.authenticate_by_token(token).await?;
        Ok(AuthUser(user))
    }
}
