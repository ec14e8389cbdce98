//! Post API integration tests
//!
//! Ownership, existence and validation checks on `/posts`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use blogd::backend::blog::Post;

use crate::common::{create_test_user, expired_token, test_server, test_state};

async fn create_post(server: &axum_test::TestServer, token: &str, title: &str) -> Post {
    let response = server
        .post("/posts")
        .authorization_bearer(token)
        .json(&json!({ "title": title, "content": "Body text" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_post_owned_by_caller() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;

    let post = create_post(&server, &alice.token, "Hello").await;
    assert_eq!(post.author_username, "alice");
    assert_eq!(post.title, "Hello");

    let fetched: Post = server.get(&format!("/posts/{}", post.id)).await.json();
    assert_eq!(fetched, post);
}

#[tokio::test]
async fn test_create_post_requires_token() {
    let server = test_server(test_state());

    let response = server
        .post("/posts")
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/posts")
        .authorization_bearer(expired_token("alice"))
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let posts: Vec<Post> = server.get("/posts").await.json();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_client_cannot_choose_author() {
    let server = test_server(test_state());
    let mallory = create_test_user(&server, "mallory").await;

    let response = server
        .post("/posts")
        .authorization_bearer(&mallory.token)
        .json(&json!({ "title": "Hello", "content": "World", "author_username": "alice" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_post_rejected() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;

    let response = server
        .post("/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "   ", "content": "World" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "title");

    let response = server
        .post("/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "x".repeat(201), "content": "World" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_owner_edit_forbidden_and_post_unchanged() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;
    let post = create_post(&server, &alice.token, "Hello").await;

    let response = server
        .put(&format!("/posts/{}", post.id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Hacked", "content": "pwned" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"], "Not the owner of this resource");

    let current: Post = server.get(&format!("/posts/{}", post.id)).await.json();
    assert_eq!(current, post);
}

#[tokio::test]
async fn test_owner_edit() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;
    let post = create_post(&server, &alice.token, "Hello").await;

    let response = server
        .put(&format!("/posts/{}", post.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Hello again", "content": "Edited" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let edited: Post = response.json();
    assert_eq!(edited.id, post.id);
    assert_eq!(edited.title, "Hello again");
    assert_eq!(edited.content, "Edited");
    assert_eq!(edited.author_username, "alice");
    assert!(edited.updated_at >= post.updated_at);
}

#[tokio::test]
async fn test_missing_post_is_404_for_everyone() {
    let server = test_server(test_state());
    let bob = create_test_user(&server, "bob").await;

    assert_eq!(server.get("/posts/999").await.status_code(), StatusCode::NOT_FOUND);

    let edit = server
        .put("/posts/999")
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "a", "content": "b" }))
        .await;
    assert_eq!(edit.status_code(), StatusCode::NOT_FOUND);

    let delete = server.delete("/posts/999").authorization_bearer(&bob.token).await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;
    let post = create_post(&server, &alice.token, "Hello").await;
    let path = format!("/posts/{}", post.id);

    let response = server.delete(&path).authorization_bearer(&bob.token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(server.get(&path).await.status_code(), StatusCode::OK);

    let response = server.delete(&path).authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_posts_by_author() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;
    create_post(&server, &alice.token, "First").await;
    create_post(&server, &bob.token, "Second").await;
    create_post(&server, &alice.token, "Third").await;

    let all: Vec<Post> = server.get("/posts").await.json();
    let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);

    let by_alice: Vec<Post> = server.get("/posts").add_query_param("author", "alice").await.json();
    assert_eq!(by_alice.len(), 2);
    assert!(by_alice.iter().all(|p| p.author_username == "alice"));
}

#[tokio::test]
async fn test_malformed_post_id_is_400() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;

    for path in ["/posts/abc", "/posts/99999999999999999999999", "/posts/1.5"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", path);
        let body: Value = response.json();
        assert_eq!(body["field"], "id");
        assert_eq!(body["status"], 400);
        assert!(body["error"].is_string());
    }

    let response = server
        .put("/posts/abc")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "id");

    let response = server.delete("/posts/abc").authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "id");
}

#[tokio::test]
async fn test_malformed_post_id_still_needs_token() {
    let server = test_server(test_state());

    let response = server.delete("/posts/abc").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
