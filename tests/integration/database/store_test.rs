//! PgStore tests
//!
//! Unique and foreign-key violations come back as the same `StoreError`s
//! the in-memory store reports.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use serde_json::{json, Value};

use blogd::backend::auth::users::{NewUser, User};
use blogd::backend::blog::comments::NewComment;
use blogd::backend::blog::posts::NewPost;
use blogd::backend::blog::Post;
use blogd::backend::store::{PgStore, ResourceStore, StoreError};

use crate::common::database::{pg_state, test_store, unique_name};
use crate::common::{create_test_user, test_server, TEST_PASSWORD};

async fn seed_user(store: &PgStore, username: &str) -> User {
    store
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "x".to_string(),
        })
        .await
        .expect("Failed to create user")
}

async fn seed_post(store: &PgStore, author: &str) -> Post {
    store
        .create_post(NewPost {
            title: "Hello".to_string(),
            content: "World".to_string(),
            author_username: author.to_string(),
        })
        .await
        .expect("Failed to create post")
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let Some(store) = test_store().await else { return };
    let name = unique_name("dup");
    seed_user(&store, &name).await;

    let err = store
        .create_user(NewUser {
            username: name.clone(),
            email: format!("other.{}@example.com", name),
            password_hash: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict(message) if message == "Username already registered");
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let Some(store) = test_store().await else { return };
    let first = seed_user(&store, &unique_name("mail")).await;

    let err = store
        .create_user(NewUser {
            username: unique_name("mail"),
            email: first.email.clone(),
            password_hash: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict(message) if message == "Email already registered");
}

#[tokio::test]
async fn test_delete_post_cascades_to_comments() {
    let Some(store) = test_store().await else { return };
    let author = seed_user(&store, &unique_name("cascade")).await;
    let post = seed_post(&store, &author.username).await;

    let comment = store
        .create_comment(NewComment {
            post_id: post.id,
            content: "First".to_string(),
            commentator_username: author.username.clone(),
        })
        .await
        .unwrap();

    store.delete_post(post.id).await.unwrap();

    assert_eq!(store.find_comment(comment.id).await.unwrap(), None);
    assert!(store.list_comments(post.id).await.unwrap().is_empty());
    assert_matches!(store.delete_post(post.id).await, Err(StoreError::Missing("post")));
}

#[tokio::test]
async fn test_comment_on_deleted_post_is_missing_post() {
    let Some(store) = test_store().await else { return };
    let author = seed_user(&store, &unique_name("gone")).await;
    let post = seed_post(&store, &author.username).await;
    store.delete_post(post.id).await.unwrap();

    let err = store
        .create_comment(NewComment {
            post_id: post.id,
            content: "Too late".to_string(),
            commentator_username: author.username.clone(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Missing("post"));
}

#[tokio::test]
async fn test_comment_by_unknown_user_is_missing_user() {
    let Some(store) = test_store().await else { return };
    let author = seed_user(&store, &unique_name("host")).await;
    let post = seed_post(&store, &author.username).await;

    let err = store
        .create_comment(NewComment {
            post_id: post.id,
            content: "Who am I".to_string(),
            commentator_username: unique_name("ghost"),
        })
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Missing("user"));
}

#[tokio::test]
async fn test_post_by_unknown_user_is_missing_user() {
    let Some(store) = test_store().await else { return };

    let err = store
        .create_post(NewPost {
            title: "Hello".to_string(),
            content: "World".to_string(),
            author_username: unique_name("ghost"),
        })
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Missing("user"));
}

#[tokio::test]
async fn test_api_over_postgres() {
    let Some(state) = pg_state().await else { return };
    let server = test_server(state);
    let alice = create_test_user(&server, &unique_name("alice")).await;

    // the username check passes, so the email collision surfaces from the unique index
    let response = server
        .post("/register")
        .json(&json!({
            "username": unique_name("bob"),
            "email": &alice.email,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Email already registered");

    let response = server
        .post("/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let post: Post = response.json();
    assert_eq!(post.author_username, alice.username);

    let response = server
        .post(&format!("/posts/{}/comments", post.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "Nice" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server.delete(&format!("/posts/{}", post.id)).authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/posts/{}/comments", post.id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
