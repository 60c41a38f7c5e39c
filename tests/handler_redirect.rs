mod common;

use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tinylink::domain::store::KeyValueStore;

#[tokio::test]
async fn test_redirect_success() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let created = server
        .post("/api/v1/urls")
        .json(&json!({
            "url": "https://example.com/target",
            "expireAt": "2099-01-01T00:00:00Z"
        }))
        .await;
    created.assert_status_ok();
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server.get(&format!("/{}", id)).await;

    assert_eq!(response.status_code(), 308);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_identifier_with_slash() {
    let (state, store) = common::create_test_state();
    store.set("ab/cd", "https://example.com/slash").await.unwrap();

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/ab/cd").await;

    assert_eq!(response.status_code(), 308);
    assert_eq!(response.header("location"), "https://example.com/slash");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/nonexistent").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_expired_link() {
    let (state, store) = common::create_test_state();
    store.set("gone", "https://example.com/old").await.unwrap();
    store
        .expire_at("gone", Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/gone").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_storage_failure_is_not_found() {
    let server = TestServer::new(common::test_app(common::create_failing_state())).unwrap();

    let response = server.get("/aHR0c6MDA=").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_unusable_stored_target_is_not_found() {
    let (state, store) = common::create_test_state();
    store.set("legacy", "https://a.io/\nx").await.unwrap();

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/legacy").await;

    assert_eq!(response.status_code(), 404);
}
