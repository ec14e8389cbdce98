/**
 * API Route Handlers
 *
 * This module wires the handler functions to their paths.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /register` - User registration
 * - `POST /login` - Exchange a credential for a session token
 * - `GET /me` - Get current user info
 *
 * ## Blog
 * - `GET|POST /posts`
 * - `GET|PUT|DELETE /posts/{id}`
 * - `GET|POST /posts/{id}/comments`
 * - `PUT|DELETE /comments/{id}`
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::blog::handlers::{
    create_comment, create_post, delete_comment, delete_post, get_post, list_comments, list_posts,
    update_comment, update_post,
};
use crate::backend::server::state::AppState;

/// Configure authentication routes
///
/// `/register` and `/login` are public; `/me` requires a bearer token,
/// checked by the `AuthUser` extractor in the handler signature.
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_me))
}

/// Configure post and comment routes
///
/// Reads are public. Writes take `AuthUser`, so a missing or invalid token
/// is rejected before any handler body runs.
pub fn configure_blog_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/comments/{id}",
            put(update_comment).delete(delete_comment),
        )
}
