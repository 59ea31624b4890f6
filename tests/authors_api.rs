//! End-to-end tests for the author endpoints.

use bubble_client::AuthorChanges;
use reqwest::Method;

mod common;

use common::{author, spawn_app};

#[tokio::test]
async fn test_create_author_hides_password() {
    let app = spawn_app().await;

    let res = app
        .client
        .send_raw(
            Method::POST,
            "/authors",
            Some(r#"{"username":"ana","email":"ana@example.com","password":"hunter22"}"#.into()),
        )
        .await
        .unwrap();
    assert_eq!(res.status, 201);
    let data = res.body.data.unwrap();
    assert_eq!(data["username"], "ana");
    assert_eq!(data["email"], "ana@example.com");
    assert!(data.get("password").is_none());
    assert!(data.get("password_hash").is_none());
}

#[tokio::test]
async fn test_malformed_json_persists_nothing() {
    let app = spawn_app().await;

    let res = app
        .client
        .send_raw(Method::POST, "/authors", Some(r#"{"username": "ana","#.into()))
        .await
        .unwrap();
    assert_eq!(res.status, 400);
    assert!(!res.body.success);
    assert_eq!(res.body.message.as_deref(), Some("invalid request body"));
    assert!(res.body.data.is_none());

    let all = app.client.list_authors().await.unwrap().into_data().unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_lookup_by_username_and_email() {
    let app = spawn_app().await;
    let created = app
        .client
        .create_author(&author("bob"))
        .await
        .unwrap()
        .into_data()
        .unwrap();

    let by_name = app.client.author_by_username("bob").await.unwrap();
    assert_eq!(by_name.status, 200);
    assert_eq!(by_name.into_data().unwrap(), created);

    let by_email = app.client.author_by_email("bob@example.com").await.unwrap();
    assert_eq!(by_email.status, 200);
    assert_eq!(by_email.into_data().unwrap(), created);

    let missing = app.client.author_by_email("nobody@example.com").await.unwrap();
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body.message.as_deref(), Some("author not found"));
}

#[tokio::test]
async fn test_update_changes_email() {
    let app = spawn_app().await;
    let created = app
        .client
        .create_author(&author("carol"))
        .await
        .unwrap()
        .into_data()
        .unwrap();

    let changes = AuthorChanges {
        email: "carol@blog.test".into(),
        password: "new secret".into(),
    };
    let updated = app.client.update_author("carol", &changes).await.unwrap();
    assert_eq!(updated.status, 200);
    let updated = updated.into_data().unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.username, "carol");
    assert_eq!(updated.email, "carol@blog.test");

    let old = app.client.author_by_email("carol@example.com").await.unwrap();
    assert_eq!(old.status, 404);

    let missing = app.client.update_author("nobody", &changes).await.unwrap();
    assert_eq!(missing.status, 404);
}

#[tokio::test]
async fn test_delete_author() {
    let app = spawn_app().await;
    app.client.create_author(&author("dave")).await.unwrap();

    let deleted = app.client.delete_author("dave").await.unwrap();
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.into_data().unwrap().username, "dave");

    let gone = app.client.author_by_username("dave").await.unwrap();
    assert_eq!(gone.status, 404);
}

#[tokio::test]
async fn test_duplicate_username_or_email_is_conflict() {
    let app = spawn_app().await;
    assert_eq!(app.client.create_author(&author("erin")).await.unwrap().status, 201);

    let same_name = app.client.create_author(&author("erin")).await.unwrap();
    assert_eq!(same_name.status, 409);
    assert_eq!(same_name.body.error.as_deref(), Some("conflict"));

    let mut same_email = author("frank");
    same_email.email = "erin@example.com".into();
    let res = app.client.create_author(&same_email).await.unwrap();
    assert_eq!(res.status, 409);

    let all = app.client.list_authors().await.unwrap().into_data().unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_empty_username_is_bad_request() {
    let app = spawn_app().await;

    let res = app.client.send_raw(Method::GET, "/authors/", None).await.unwrap();
    assert_eq!(res.status, 400);
    assert_eq!(res.body.message.as_deref(), Some("username is required"));

    let mut blank = author("x");
    blank.username = String::new();
    let res = app.client.create_author(&blank).await.unwrap();
    assert_eq!(res.status, 400);
}
