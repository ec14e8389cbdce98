/**
 * Blog Handler Types
 *
 * Request bodies and query parameters for the post and comment handlers.
 * None of them carry an owner field: authorship always comes from the
 * bearer token, and unknown fields are rejected outright.
 */

use serde::{Deserialize, Serialize};

/// Body for creating or replacing a post
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

/// Body for creating or replacing a comment
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommentRequest {
    pub content: String,
}

/// `GET /posts` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    /// Only return posts by this username
    pub author: Option<String>,
}
