/**
 * Error Conversion
 *
 * Conversions into and out of `BackendError`:
 *
 * - Component errors (`StoreError`, `TokenError`, extractor rejections)
 *   become `BackendError` through `From`, so handlers can use `?`.
 * - `BackendError` becomes an HTTP response through `IntoResponse`.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400,
 *   "field": "title"
 * }
 * ```
 *
 * `field` is present only for validation errors. 401 responses carry a
 * `WWW-Authenticate: Bearer` header.
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::header::WWW_AUTHENTICATE,
    response::{IntoResponse, Json, Response},
};
use crate::backend::auth::sessions::TokenError;
use crate::backend::error::types::BackendError;
use crate::backend::store::StoreError;

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => BackendError::conflict(message),
            StoreError::Database(e) => BackendError::internal(format!("database error: {}", e)),
            StoreError::Missing(resource) => BackendError::not_found(resource),
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken(_) => BackendError::invalid_credentials(),
            TokenError::Encoding(e) => BackendError::internal(format!("token signing failed: {}", e)),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        BackendError::validation("id", rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::validation("query", rejection.body_text())
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let BackendError::Internal { message } = &self {
            tracing::error!("Internal error: {}", message);
        }

        let mut body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });
        if let BackendError::Validation(err) = &self {
            body["field"] = serde_json::Value::from(err.field());
        }

        let mut response = (status, Json(body)).into_response();
        if matches!(self, BackendError::Unauthenticated { .. }) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, axum::http::HeaderValue::from_static("Bearer"));
        }
        response
    }
}
