//! Comment API integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use blogd::backend::blog::{Comment, Post};

use crate::common::{create_test_user, test_server, test_state};

#[tokio::test]
async fn test_comment_lifecycle() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;

    let post: Post = server
        .post("/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await
        .json();
    let comments_path = format!("/posts/{}/comments", post.id);

    let response = server
        .post(&comments_path)
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "Nice post" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let comment: Comment = response.json();
    assert_eq!(comment.commentator_username, "bob");
    assert_eq!(comment.post_id, post.id);

    // post author cannot edit bob's comment
    let response = server
        .put(&format!("/comments/{}", comment.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "Edited by alice" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .put(&format!("/comments/{}", comment.id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "Edited" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Comment>().content, "Edited");

    let listed: Vec<Comment> = server.get(&comments_path).await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Edited");

    let response = server
        .delete(&format!("/comments/{}", comment.id))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(server.get(&comments_path).await.json::<Vec<Comment>>().is_empty());
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let server = test_server(test_state());
    let bob = create_test_user(&server, "bob").await;

    let response = server
        .post("/posts/42/comments")
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "Anyone here?" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(server.get("/posts/42/comments").await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_requires_token() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;
    let post: Post = server
        .post("/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await
        .json();

    let response = server
        .post(&format!("/posts/{}/comments", post.id))
        .json(&json!({ "content": "anonymous" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleting_post_removes_its_comments() {
    let state = test_state();
    let server = test_server(state.clone());
    let alice = create_test_user(&server, "alice").await;
    let bob = create_test_user(&server, "bob").await;

    let post: Post = server
        .post("/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await
        .json();
    let comment: Comment = server
        .post(&format!("/posts/{}/comments", post.id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "First!" }))
        .await
        .json();

    server
        .delete(&format!("/posts/{}", post.id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(state.store.find_comment(comment.id).await.unwrap().is_none());
    let response = server
        .delete(&format!("/comments/{}", comment.id))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_ids_are_400() {
    let server = test_server(test_state());
    let bob = create_test_user(&server, "bob").await;

    let response = server.get("/posts/abc/comments").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "id");

    let response = server
        .post("/posts/abc/comments")
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "hello?" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "id");

    let response = server
        .put("/comments/abc")
        .authorization_bearer(&bob.token)
        .json(&json!({ "content": "Edited" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "id");
    assert_eq!(body["status"], 400);
}
